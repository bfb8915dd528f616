//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use moka::sync::Cache;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::{AbbrError, Result};
use crate::storage::models::{AbbreviationEntry, EntryDraft, EntryPage, StorageConfig};
use crate::storage::traits::EntryStore;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{draft_to_new_active_model, model_to_entry};
pub use query::escape_like;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(AbbrError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// 分页 COUNT 缓存（TTL 30秒）
    count_cache: Cache<String, u64>,
    /// 每次数据变更加一，用于丢弃变更前算出的 COUNT
    count_generation: Arc<AtomicU64>,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        Self::with_config(database_url, backend_name, &DatabaseConfig::default()).await
    }

    pub async fn with_config(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(AbbrError::database_config("DATABASE_URL 未设置"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, config.pool_size, config.timeout).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            count_cache: Cache::builder()
                .time_to_live(Duration::from_secs(30))
                .max_capacity(100)
                .build(),
            count_generation: Arc::new(AtomicU64::new(0)),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 清除分页 COUNT 缓存（数据变更提交后调用）
    pub fn invalidate_count_cache(&self) {
        self.count_generation.fetch_add(1, Ordering::SeqCst);
        self.count_cache.invalidate_all();
    }

    fn count_generation(&self) -> u64 {
        self.count_generation.load(Ordering::SeqCst)
    }

    /// 仅当统计期间没有数据变更时才缓存 COUNT
    ///
    /// 写入后再检查一次：变更可能发生在检查与写入之间。
    fn cache_count_if_current(&self, key: String, count: u64, generation: u64) {
        if self.count_generation() != generation {
            return;
        }
        self.count_cache.insert(key.clone(), count);
        if self.count_generation() != generation {
            self.count_cache.invalidate(&key);
        }
    }
}

#[async_trait]
impl EntryStore for SeaOrmStorage {
    async fn search(&self, keyword: &str, limit: Option<u64>) -> Result<Vec<AbbreviationEntry>> {
        self.find_by_substring(keyword, limit).await
    }

    async fn get(&self, id: &str) -> Result<Option<AbbreviationEntry>> {
        self.find_by_id(id).await
    }

    async fn insert(&self, draft: EntryDraft) -> Result<AbbreviationEntry> {
        self.insert_entry(draft).await
    }

    async fn update(&self, id: &str, draft: EntryDraft) -> Result<AbbreviationEntry> {
        self.update_entry(id, draft).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.remove_entry(id).await
    }

    async fn increment_copy_count(&self, id: &str) -> Result<()> {
        self.increment_copy(id).await
    }

    async fn top_by_copy_count(&self, limit: u64) -> Result<Vec<AbbreviationEntry>> {
        self.load_most_copied(limit).await
    }

    async fn recent(&self, limit: u64) -> Result<Vec<AbbreviationEntry>> {
        self.load_recent(limit).await
    }

    async fn page(&self, page: u64, page_size: u64, search: Option<&str>) -> Result<EntryPage> {
        self.load_paginated(page, page_size, search).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_all().await
    }

    fn backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_storage() -> (SeaOrmStorage, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("cache.db").display());
        let storage = SeaOrmStorage::new(&url, "sqlite").await.unwrap();
        (storage, dir)
    }

    #[tokio::test]
    async fn test_stale_count_not_cached_after_mutation() {
        let (storage, _dir) = temp_storage().await;

        // COUNT 开始时的代数，随后有并发写入提交
        let generation = storage.count_generation();
        storage.insert(EntryDraft::new("A", "一")).await.unwrap();

        storage.cache_count_if_current("count:s=None".to_string(), 0, generation);
        assert!(storage.count_cache.get("count:s=None").is_none());
        assert_eq!(storage.page(1, 10, None).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_current_count_is_cached() {
        let (storage, _dir) = temp_storage().await;

        let generation = storage.count_generation();
        storage.cache_count_if_current("k".to_string(), 7, generation);
        assert_eq!(storage.count_cache.get("k"), Some(7));

        storage.invalidate_count_cache();
        assert!(storage.count_cache.get("k").is_none());
        assert_ne!(storage.count_generation(), generation);
    }

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(
            infer_backend_from_url("sqlite://abbreviations.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(infer_backend_from_url("data/dict.db").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mysql://u:p@localhost/dict").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("mariadb://u:p@localhost/dict").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgres://u:p@localhost/dict").unwrap(),
            "postgres"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://u:p@localhost/dict").unwrap(),
            "postgres"
        );
    }

    #[test]
    fn test_infer_backend_unknown() {
        let err = infer_backend_from_url("mongodb://localhost/dict").unwrap_err();
        assert!(matches!(err, AbbrError::DatabaseConfig(_)));
    }
}
