use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 简写最大长度（字符数）
pub const MAX_ABBREVIATION_LEN: usize = 64;

/// 全称最大长度（字符数）
pub const MAX_FULL_NAME_LEN: usize = 512;

/// One abbreviation → full name mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbbreviationEntry {
    pub id: String,
    pub abbreviation: String,
    pub full_name: String,
    #[serde(default)]
    pub copy_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AbbreviationEntry {
    /// 简写或全称是否（忽略大小写）包含该关键词
    ///
    /// `needle_lower` 必须已经转为小写。
    pub fn contains_lowercase(&self, needle_lower: &str) -> bool {
        self.abbreviation.to_lowercase().contains(needle_lower)
            || self.full_name.to_lowercase().contains(needle_lower)
    }

    /// 简写或全称是否（忽略大小写）包含该关键词
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        self.contains_lowercase(&keyword.to_lowercase())
    }
}

/// 写入用的字段，存储层负责规范化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub abbreviation: String,
    pub full_name: String,
}

impl EntryDraft {
    pub fn new(abbreviation: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            full_name: full_name.into(),
        }
    }

    /// 去除首尾空白，简写统一大写
    pub fn normalized(&self) -> Self {
        Self {
            abbreviation: normalize_abbreviation(&self.abbreviation),
            full_name: normalize_full_name(&self.full_name),
        }
    }
}

pub fn normalize_abbreviation(raw: &str) -> String {
    raw.trim().to_uppercase()
}

pub fn normalize_full_name(raw: &str) -> String {
    raw.trim().to_string()
}

/// 搜索列的写入值，与查询关键词使用同一套 Unicode 小写规则
pub fn search_key(raw: &str) -> String {
    raw.to_lowercase()
}

/// 分页查询结果
#[derive(Debug, Clone, Default)]
pub struct EntryPage {
    pub items: Vec<AbbreviationEntry>,
    /// 过滤后的总行数（跨所有页）
    pub total: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
