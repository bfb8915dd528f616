//! Abbreviation management service
//!
//! Provides unified business logic for dictionary operations, shared between
//! HTTP handlers and CLI commands.

use std::sync::Arc;

use tracing::{info, warn};

use super::resolver::{self, Resolution};
use crate::config::{SearchConfig, get_config};
use crate::errors::{AbbrError, Result};
use crate::storage::models::{MAX_ABBREVIATION_LEN, MAX_FULL_NAME_LEN};
use crate::storage::{AbbreviationEntry, EntryDraft, EntryPage, EntryStore};

/// 热门列表默认条数
pub const HOT_LIMIT: u64 = 10;

/// 默认列表（无参数 GET）条数
pub const RECENT_LIMIT: u64 = 10;

/// CLI `hot --limit` 上限
pub const MAX_HOT_LIMIT: u64 = 100;

/// 分页请求（缺省值由配置补齐）
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub search: Option<String>,
}

/// Service for abbreviation dictionary operations
pub struct AbbreviationService {
    store: Arc<dyn EntryStore>,
    search_config: SearchConfig,
}

impl AbbreviationService {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self::with_search_config(store, get_config().search.clone())
    }

    pub fn with_search_config(store: Arc<dyn EntryStore>, search_config: SearchConfig) -> Self {
        Self {
            store,
            search_config,
        }
    }

    pub fn store(&self) -> &Arc<dyn EntryStore> {
        &self.store
    }

    // ============ Read ============

    pub async fn resolve(&self, query: &str) -> Result<Resolution> {
        resolver::resolve(self.store.as_ref(), query).await
    }

    pub async fn hot(&self, limit: u64) -> Result<Vec<AbbreviationEntry>> {
        self.store
            .top_by_copy_count(limit.clamp(1, MAX_HOT_LIMIT))
            .await
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<AbbreviationEntry>> {
        self.store.recent(limit.max(1)).await
    }

    pub async fn get(&self, id: &str) -> Result<AbbreviationEntry> {
        let id = require_id(id)?;
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AbbrError::not_found(format!("词条不存在: {}", id)))
    }

    pub async fn page(&self, req: PageRequest) -> Result<EntryPage> {
        let page = req.page.unwrap_or(1);
        let page_size = req
            .page_size
            .unwrap_or(self.search_config.default_page_size);

        if page == 0 {
            return Err(AbbrError::validation("page must be at least 1"));
        }
        if page_size == 0 {
            return Err(AbbrError::validation("pageSize must be at least 1"));
        }

        let page_size = page_size.min(self.search_config.max_page_size.max(1));
        let search = req
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        self.store.page(page, page_size, search).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.store.count().await
    }

    // ============ Write ============

    pub async fn add(&self, abbreviation: &str, full_name: &str) -> Result<AbbreviationEntry> {
        let draft = validate_draft(abbreviation, full_name)?;
        let entry = self.store.insert(draft).await?;
        info!(
            "Added abbreviation {} ({}) -> {}",
            entry.abbreviation, entry.id, entry.full_name
        );
        Ok(entry)
    }

    pub async fn update(
        &self,
        id: &str,
        abbreviation: &str,
        full_name: &str,
    ) -> Result<AbbreviationEntry> {
        let id = require_id(id)?;
        let draft = validate_draft(abbreviation, full_name)?;
        let entry = self.store.update(id, draft).await?;
        info!("Updated abbreviation {} -> {}", id, entry.abbreviation);
        Ok(entry)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id(id)?;
        self.store.delete(id).await?;
        info!("Deleted abbreviation {}", id);
        Ok(())
    }

    pub async fn increment_copy(&self, id: &str) -> Result<()> {
        let id = require_id(id).map_err(|_| AbbrError::validation("Missing ID for increment-copy"))?;
        self.store.increment_copy_count(id).await.inspect_err(|e| {
            if matches!(e, AbbrError::NotFound(_)) {
                warn!("increment-copy for unknown id {}", id);
            }
        })
    }
}

fn require_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AbbrError::validation("Missing ID"));
    }
    Ok(id)
}

/// 校验并构造写入草稿
pub fn validate_draft(abbreviation: &str, full_name: &str) -> Result<EntryDraft> {
    let abbreviation = abbreviation.trim();
    let full_name = full_name.trim();

    if abbreviation.is_empty() || full_name.is_empty() {
        return Err(AbbrError::validation("Missing required fields"));
    }
    if abbreviation.chars().count() > MAX_ABBREVIATION_LEN {
        return Err(AbbrError::validation(format!(
            "abbreviation exceeds {} characters",
            MAX_ABBREVIATION_LEN
        )));
    }
    if full_name.chars().count() > MAX_FULL_NAME_LEN {
        return Err(AbbrError::validation(format!(
            "fullName exceeds {} characters",
            MAX_FULL_NAME_LEN
        )));
    }

    Ok(EntryDraft::new(abbreviation, full_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_draft_ok() {
        let draft = validate_draft(" gsdj ", " 公示地价 ").unwrap();
        assert_eq!(draft.abbreviation, "gsdj");
        assert_eq!(draft.full_name, "公示地价");
    }

    #[test]
    fn test_validate_draft_blank() {
        assert!(matches!(
            validate_draft("  ", "公示地价"),
            Err(AbbrError::Validation(_))
        ));
        assert!(matches!(
            validate_draft("GSDJ", "\n"),
            Err(AbbrError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_draft_limits() {
        let long_abbr = "A".repeat(MAX_ABBREVIATION_LEN + 1);
        assert!(validate_draft(&long_abbr, "x").is_err());
        assert!(validate_draft(&"A".repeat(MAX_ABBREVIATION_LEN), "x").is_ok());

        // 按字符计数，而不是字节
        let cjk = "地".repeat(MAX_FULL_NAME_LEN);
        assert!(validate_draft("A", &cjk).is_ok());
        let cjk_long = "地".repeat(MAX_FULL_NAME_LEN + 1);
        assert!(validate_draft("A", &cjk_long).is_err());
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(" abc ").unwrap(), "abc");
        assert!(require_id("").is_err());
    }
}
