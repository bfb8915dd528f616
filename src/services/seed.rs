//! Built-in sample dictionary

use tracing::{debug, info};

use crate::errors::Result;
use crate::storage::{EntryDraft, EntryStore};

/// 内置示例词条 (简写, 全称)
pub const SAMPLE_ENTRIES: [(&str, &str); 10] = [
    ("GSDJ", "公示地价"),
    ("JZDJ", "基准地价"),
    ("TDLY", "土地利用"),
    ("GHGH", "规划规划"),
    ("ZRZY", "自然资源"),
    ("GTPO", "国土空间规划"),
    ("TDQX", "土地权属"),
    ("JBNT", "基本农田"),
    ("STTD", "生态土地"),
    ("CJYD", "城建用地"),
];

/// 表为空时写入示例数据，返回写入条数
pub async fn seed_if_empty(store: &dyn EntryStore) -> Result<usize> {
    let existing = store.count().await?;
    if existing > 0 {
        debug!("Skip seeding, table already has {} entries", existing);
        return Ok(0);
    }

    for (abbreviation, full_name) in SAMPLE_ENTRIES {
        store.insert(EntryDraft::new(abbreviation, full_name)).await?;
    }

    info!("Seeded {} sample abbreviations", SAMPLE_ENTRIES.len());
    Ok(SAMPLE_ENTRIES.len())
}
