use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::errors::Result;

pub mod backend;
pub mod models;
pub mod traits;

pub use backend::SeaOrmStorage;
pub use models::{AbbreviationEntry, EntryDraft, EntryPage, StorageConfig};
pub use traits::EntryStore;

static SHARED_STORAGE: OnceCell<Arc<SeaOrmStorage>> = OnceCell::const_new();

pub struct StorageFactory;

impl StorageFactory {
    /// 按当前配置新建存储（每次调用都建立新的连接池）
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage =
            SeaOrmStorage::with_config(database_url, &backend_type, &config.database).await?;
        Ok(Arc::new(storage))
    }

    /// 进程内共享的存储实例
    ///
    /// 初始化失败不会被缓存，下次调用会重新尝试连接。
    pub async fn shared() -> Result<Arc<SeaOrmStorage>> {
        SHARED_STORAGE
            .get_or_try_init(Self::create)
            .await
            .map(Arc::clone)
    }
}
