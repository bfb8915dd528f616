use async_trait::async_trait;

use crate::errors::Result;

use super::models::{AbbreviationEntry, EntryDraft, EntryPage, StorageConfig};

/// 词条存储
///
/// 所有匹配都是忽略大小写的子串包含（简写或全称任一命中即可）。
/// 实现方不做重试，失败直接返回。
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// 查找简写或全称包含 `keyword` 的词条，按 created_at 倒序
    ///
    /// `limit` 为 `None` 时返回全部命中。
    async fn search(&self, keyword: &str, limit: Option<u64>) -> Result<Vec<AbbreviationEntry>>;

    async fn get(&self, id: &str) -> Result<Option<AbbreviationEntry>>;

    /// 插入新词条，分配 id 和时间戳；简写写入前转大写
    async fn insert(&self, draft: EntryDraft) -> Result<AbbreviationEntry>;

    /// 更新简写和全称；id 不存在时返回 `NotFound`
    async fn update(&self, id: &str, draft: EntryDraft) -> Result<AbbreviationEntry>;

    /// 删除词条；id 不存在时返回 `NotFound`
    async fn delete(&self, id: &str) -> Result<()>;

    /// 原子地将 copy_count 加一；id 不存在时返回 `NotFound`
    async fn increment_copy_count(&self, id: &str) -> Result<()>;

    /// 按 copy_count 倒序（相同时按 created_at 倒序）
    async fn top_by_copy_count(&self, limit: u64) -> Result<Vec<AbbreviationEntry>>;

    /// 最新创建的词条
    async fn recent(&self, limit: u64) -> Result<Vec<AbbreviationEntry>>;

    /// 分页（page 从 1 开始），可选子串过滤；total 为过滤后的总数
    async fn page(&self, page: u64, page_size: u64, search: Option<&str>) -> Result<EntryPage>;

    async fn count(&self) -> Result<u64>;

    fn backend_config(&self) -> StorageConfig;
}
