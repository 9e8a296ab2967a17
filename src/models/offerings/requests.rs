use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 开课列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/offering.ts")]
pub struct OfferingQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 按课程代码或名称搜索
    pub search: Option<String>,
}

// 开课列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct OfferingListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub lecturer_id: Option<i64>,
    pub search: Option<String>,
}
