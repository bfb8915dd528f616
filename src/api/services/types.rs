//! HTTP 请求/响应类型定义

use serde::{Deserialize, Serialize};

use crate::storage::AbbreviationEntry;

/// `GET /abbreviations` 的查询参数
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AbbreviationQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub admin_search: Option<String>,
}

/// GET 请求的分派结果，按 q → type=hot → 分页参数 → 默认列表 的优先级
///
/// page、pageSize、adminSearch 任一出现即为分页模式，缺省的 page 取 1。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode<'a> {
    Resolve(&'a str),
    Hot,
    Page,
    Recent,
}

impl AbbreviationQuery {
    fn has_paging_params(&self) -> bool {
        self.page.is_some() || self.page_size.is_some() || self.admin_search.is_some()
    }

    pub fn mode(&self) -> ListMode<'_> {
        if let Some(q) = self.q.as_deref() {
            ListMode::Resolve(q)
        } else if self.kind.as_deref() == Some("hot") {
            ListMode::Hot
        } else if self.has_paging_params() {
            ListMode::Page
        } else {
            ListMode::Recent
        }
    }
}

/// `?id=` 查询参数（DELETE 与 increment-copy）
#[derive(Deserialize, Debug, Clone, Default)]
pub struct IdQuery {
    #[serde(default)]
    pub id: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewAbbreviation {
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAbbreviation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub success: bool,
    pub found_results: Vec<AbbreviationEntry>,
    pub not_found_keywords: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

#[derive(Serialize, Debug, Clone)]
pub struct PageResponse {
    pub success: bool,
    pub data: Vec<AbbreviationEntry>,
    pub total: u64,
}

#[derive(Serialize, Debug, Clone)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub status: String,
    pub entries: Option<u64>,
    pub uptime_seconds: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(qs: &str) -> AbbreviationQuery {
        actix_web::web::Query::<AbbreviationQuery>::from_query(qs)
            .unwrap()
            .into_inner()
    }

    #[test]
    fn test_mode_precedence() {
        assert_eq!(query("q=GSDJ&type=hot&page=1").mode(), ListMode::Resolve("GSDJ"));
        assert_eq!(query("type=hot&page=1").mode(), ListMode::Hot);
        assert_eq!(query("page=2&pageSize=50").mode(), ListMode::Page);
        assert_eq!(query("type=other").mode(), ListMode::Recent);
        assert_eq!(query("").mode(), ListMode::Recent);
    }

    #[test]
    fn test_page_mode_without_page_number() {
        assert_eq!(query("pageSize=20").mode(), ListMode::Page);
        assert_eq!(query("adminSearch=%E5%9C%B0%E4%BB%B7").mode(), ListMode::Page);
        assert_eq!(query("pageSize=20&adminSearch=x").mode(), ListMode::Page);
        assert_eq!(query("type=hot&pageSize=20").mode(), ListMode::Hot);
    }

    #[test]
    fn test_empty_q_still_resolves() {
        assert_eq!(query("q=").mode(), ListMode::Resolve(""));
    }

    #[test]
    fn test_camel_case_params() {
        let q = query("page=3&pageSize=100&adminSearch=%E5%9C%B0%E4%BB%B7");
        assert_eq!(q.page, Some(3));
        assert_eq!(q.page_size, Some(100));
        assert_eq!(q.admin_search.as_deref(), Some("地价"));
    }

    #[test]
    fn test_malformed_number_rejected() {
        assert!(actix_web::web::Query::<AbbreviationQuery>::from_query("page=abc").is_err());
    }
}
