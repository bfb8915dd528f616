use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;

use crate::storage::models::{AbbreviationEntry, EntryDraft, search_key};
use migration::entities::abbreviation;

/// 将 Sea-ORM Model 转换为 AbbreviationEntry
pub fn model_to_entry(model: abbreviation::Model) -> AbbreviationEntry {
    AbbreviationEntry {
        id: model.id,
        abbreviation: model.abbreviation,
        full_name: model.full_name,
        copy_count: model.copy_count.max(0) as u64,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 为新词条构建 ActiveModel：分配 id，规范化字段，计数归零
pub fn draft_to_new_active_model(
    draft: &EntryDraft,
    now: DateTime<Utc>,
) -> abbreviation::ActiveModel {
    let draft = draft.normalized();

    abbreviation::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        abbreviation_search: Set(search_key(&draft.abbreviation)),
        full_name_search: Set(search_key(&draft.full_name)),
        abbreviation: Set(draft.abbreviation),
        full_name: Set(draft.full_name),
        copy_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
