//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{
    Condition, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, LikeExpr},
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::model_to_entry;
use crate::errors::{AbbrError, Result};
use crate::storage::models::{AbbreviationEntry, EntryPage, search_key};

use migration::entities::abbreviation;

/// LIKE 转义字符
const LIKE_ESCAPE: char = '\\';

/// 转义 LIKE 通配符，使关键词按字面匹配
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// abbreviation_search LIKE %kw% OR full_name_search LIKE %kw%
///
/// 搜索列在写入时已按 Unicode 规则转小写，不依赖数据库的 lower()。
fn substring_condition(keyword: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&search_key(keyword)));

    Condition::any()
        .add(
            Expr::col(abbreviation::Column::AbbreviationSearch)
                .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
        )
        .add(
            Expr::col(abbreviation::Column::FullNameSearch)
                .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
        )
}

impl SeaOrmStorage {
    pub(super) async fn find_by_substring(
        &self,
        keyword: &str,
        limit: Option<u64>,
    ) -> Result<Vec<AbbreviationEntry>> {
        let mut query = abbreviation::Entity::find()
            .filter(substring_condition(keyword))
            .order_by_desc(abbreviation::Column::CreatedAt)
            .order_by_asc(abbreviation::Column::Id);

        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let models = query.all(&self.db).await.map_err(|e| {
            AbbrError::database_operation(format!("查询词条失败 ({}): {}", keyword, e))
        })?;

        debug!("search({}) -> {} rows", keyword, models.len());
        Ok(models.into_iter().map(model_to_entry).collect())
    }

    pub(super) async fn find_by_id(&self, id: &str) -> Result<Option<AbbreviationEntry>> {
        let model = abbreviation::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AbbrError::database_operation(format!("查询词条失败 ({}): {}", id, e)))?;

        Ok(model.map(model_to_entry))
    }

    pub(super) async fn load_most_copied(&self, limit: u64) -> Result<Vec<AbbreviationEntry>> {
        let models = abbreviation::Entity::find()
            .order_by_desc(abbreviation::Column::CopyCount)
            .order_by_desc(abbreviation::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| AbbrError::database_operation(format!("加载热门词条失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_entry).collect())
    }

    pub(super) async fn load_recent(&self, limit: u64) -> Result<Vec<AbbreviationEntry>> {
        let models = abbreviation::Entity::find()
            .order_by_desc(abbreviation::Column::CreatedAt)
            .order_by_asc(abbreviation::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| AbbrError::database_operation(format!("加载最新词条失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_entry).collect())
    }

    /// 带过滤条件的分页加载（带 COUNT 缓存）
    pub(super) async fn load_paginated(
        &self,
        page: u64,
        page_size: u64,
        search: Option<&str>,
    ) -> Result<EntryPage> {
        if page == 0 || page_size == 0 {
            return Err(AbbrError::validation("page 和 pageSize 必须大于 0"));
        }

        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let cache_key = format!("count:s={:?}", search.map(search_key));

        let mut condition = Condition::all();
        if let Some(keyword) = search {
            condition = condition.add(substring_condition(keyword));
        }

        let total = if let Some(cached) = self.count_cache.get(&cache_key) {
            debug!("count cache hit: key={}, value={}", cache_key, cached);
            cached
        } else {
            let generation = self.count_generation();
            let count = abbreviation::Entity::find()
                .filter(condition.clone())
                .count(&self.db)
                .await
                .map_err(|e| AbbrError::database_operation(format!("统计词条失败: {}", e)))?;
            self.cache_count_if_current(cache_key, count, generation);
            count
        };

        let models = abbreviation::Entity::find()
            .filter(condition)
            .order_by_desc(abbreviation::Column::CreatedAt)
            .order_by_asc(abbreviation::Column::Id)
            .paginate(&self.db, page_size)
            .fetch_page(page - 1)
            .await
            .map_err(|e| AbbrError::database_operation(format!("分页查询失败: {}", e)))?;

        Ok(EntryPage {
            items: models.into_iter().map(model_to_entry).collect(),
            total,
        })
    }

    pub(super) async fn count_all(&self) -> Result<u64> {
        let count = abbreviation::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| AbbrError::database_operation(format!("统计词条失败: {}", e)))?;

        info!("Abbreviation table holds {} entries", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain() {
        assert_eq!(escape_like("gsdj"), "gsdj");
        assert_eq!(escape_like("公示地价"), "公示地价");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\d"), "c:\\\\d");
    }
}
