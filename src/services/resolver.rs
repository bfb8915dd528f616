//! Multi-keyword resolution
//!
//! A raw query is split into keywords; each keyword is looked up by
//! case-insensitive substring and matches are merged by id. Every keyword is
//! classified as covered or unmatched before the merged list is capped.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::storage::{AbbreviationEntry, EntryStore};

/// 单次查询最多返回的词条数
pub const MAX_RESULTS: usize = 10;

fn is_separator(c: char) -> bool {
    matches!(c, ',' | ';' | '\r' | '\n')
}

/// 按 `,` `;` 换行拆分查询，去空白、去空项、忽略大小写去重（保留首次出现的写法）
pub fn split_keywords(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    query
        .split(is_separator)
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .filter(|kw| seen.insert(kw.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// 去重后的命中词条，最多 [`MAX_RESULTS`] 条
    pub matches: Vec<AbbreviationEntry>,
    /// 未被任何命中词条覆盖的关键词，保持输入顺序
    pub unmatched: Vec<String>,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.unmatched.is_empty()
    }
}

/// 解析查询
///
/// 任一关键词查询失败即整体失败，不返回部分结果。
pub async fn resolve(store: &dyn EntryStore, query: &str) -> Result<Resolution> {
    let keywords = split_keywords(query);
    if keywords.is_empty() {
        return Ok(Resolution::default());
    }

    let mut seen_ids = HashSet::new();
    let mut matches: Vec<AbbreviationEntry> = Vec::new();

    for keyword in &keywords {
        // 输出只保留前 MAX_RESULTS 条；分类只需知道是否有命中，取 MAX_RESULTS 行足够
        let found = store.search(keyword, Some(MAX_RESULTS as u64)).await?;
        debug!("keyword {:?} -> {} candidates", keyword, found.len());

        for entry in found {
            if seen_ids.insert(entry.id.clone()) {
                matches.push(entry);
            }
        }
    }

    // 在截断之前分类：命中但被挤出前 MAX_RESULTS 的关键词不算未找到
    let unmatched = keywords
        .into_iter()
        .filter(|kw| {
            let needle = kw.to_lowercase();
            !matches.iter().any(|e| e.contains_lowercase(&needle))
        })
        .collect();

    matches.truncate(MAX_RESULTS);

    Ok(Resolution { matches, unmatched })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_mixed_separators() {
        assert_eq!(
            split_keywords("GSDJ,JZDJ;TDLY\nXXXX"),
            vec!["GSDJ", "JZDJ", "TDLY", "XXXX"]
        );
    }

    #[test]
    fn test_split_trims_and_drops_empty() {
        assert_eq!(
            split_keywords("  gsdj ,, ;\r\n\r\n  jzdj  ;"),
            vec!["gsdj", "jzdj"]
        );
        assert!(split_keywords("").is_empty());
        assert!(split_keywords(" ,;\n ").is_empty());
    }

    #[test]
    fn test_split_dedupes_case_insensitive() {
        assert_eq!(
            split_keywords("gsdj,GSDJ,Gsdj,jzdj"),
            vec!["gsdj", "jzdj"]
        );
    }

    #[test]
    fn test_split_keeps_inner_spaces() {
        assert_eq!(
            split_keywords("land use, 公示 地价"),
            vec!["land use", "公示 地价"]
        );
    }
}
