use super::entities::IssueStatus;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 问题列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/issue.ts")]
pub struct IssueQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<IssueStatus>,
}

// 问题列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct IssueListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<IssueStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/issue.ts")]
pub struct ResolveIssueRequest {
    pub response: String,
}
