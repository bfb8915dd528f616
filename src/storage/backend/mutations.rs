//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, QueryFilter, sea_query::Expr};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{draft_to_new_active_model, model_to_entry};
use crate::errors::{AbbrError, Result};
use crate::storage::models::{AbbreviationEntry, EntryDraft, search_key};

use migration::entities::abbreviation;

impl SeaOrmStorage {
    pub(super) async fn insert_entry(&self, draft: EntryDraft) -> Result<AbbreviationEntry> {
        let active = draft_to_new_active_model(&draft, Utc::now());

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| AbbrError::database_operation(format!("插入词条失败: {}", e)))?;

        self.invalidate_count_cache();
        info!("Abbreviation created: {} -> {}", model.abbreviation, model.id);
        Ok(model_to_entry(model))
    }

    pub(super) async fn update_entry(
        &self,
        id: &str,
        draft: EntryDraft,
    ) -> Result<AbbreviationEntry> {
        let draft = draft.normalized();

        let result = abbreviation::Entity::update_many()
            .col_expr(
                abbreviation::Column::AbbreviationSearch,
                Expr::value(search_key(&draft.abbreviation)),
            )
            .col_expr(
                abbreviation::Column::FullNameSearch,
                Expr::value(search_key(&draft.full_name)),
            )
            .col_expr(
                abbreviation::Column::Abbreviation,
                Expr::value(draft.abbreviation),
            )
            .col_expr(abbreviation::Column::FullName, Expr::value(draft.full_name))
            .col_expr(abbreviation::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(abbreviation::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AbbrError::database_operation(format!("更新词条失败 ({}): {}", id, e)))?;

        if result.rows_affected == 0 {
            return Err(AbbrError::not_found(format!("词条不存在: {}", id)));
        }

        // 搜索结果可能因简写/全称变化而改变
        self.invalidate_count_cache();

        // 并发删除时可能已不存在
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AbbrError::not_found(format!("词条不存在: {}", id)))
    }

    pub(super) async fn remove_entry(&self, id: &str) -> Result<()> {
        let result = abbreviation::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| AbbrError::database_operation(format!("删除词条失败 ({}): {}", id, e)))?;

        if result.rows_affected == 0 {
            return Err(AbbrError::not_found(format!("词条不存在: {}", id)));
        }

        self.invalidate_count_cache();
        info!("Abbreviation deleted: {}", id);
        Ok(())
    }

    /// 单条 UPDATE 完成自增，并发调用不会丢失计数
    pub(super) async fn increment_copy(&self, id: &str) -> Result<()> {
        let result = abbreviation::Entity::update_many()
            .col_expr(
                abbreviation::Column::CopyCount,
                Expr::col(abbreviation::Column::CopyCount).add(1i64),
            )
            .col_expr(abbreviation::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(abbreviation::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                AbbrError::database_operation(format!("更新复制次数失败 ({}): {}", id, e))
            })?;

        if result.rows_affected == 0 {
            return Err(AbbrError::not_found(format!("词条不存在: {}", id)));
        }

        Ok(())
    }
}
