use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// 每页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_SIZE: i64 = 10;

// 分页查询参数，查询字符串中的数字以文本形式出现
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(default = "default_page", deserialize_with = "lenient_i64")]
    pub page: i64,
    #[serde(default = "default_size", deserialize_with = "lenient_i64")]
    pub size: i64,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

/// 规整存储层收到的分页参数，返回从 1 开始的 (page, size)
pub fn page_bounds(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let size = size.unwrap_or(DEFAULT_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page as u64, size as u64)
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_size() -> i64 {
    DEFAULT_SIZE
}

// 同时接受整数和整数字符串
fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(|_| {
            serde::de::Error::custom(format!("invalid integer '{text}'"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_bounds_defaults_and_clamps() {
        assert_eq!(page_bounds(None, None), (1, 10));
        assert_eq!(page_bounds(Some(0), Some(0)), (1, 1));
        assert_eq!(page_bounds(Some(-3), Some(500)), (1, 100));
        assert_eq!(page_bounds(Some(4), Some(25)), (4, 25));
    }

    #[test]
    fn test_query_accepts_numeric_strings() {
        let query: PaginationQuery =
            serde_json::from_value(serde_json::json!({ "page": "2", "size": 30 })).unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(query.size, 30);

        let query: PaginationQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!((query.page, query.size), (1, 10));

        assert!(
            serde_json::from_value::<PaginationQuery>(serde_json::json!({ "page": "two" }))
                .is_err()
        );
    }
}
