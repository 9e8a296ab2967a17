use super::entities::Issue;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/issue.ts")]
pub struct IssueListResponse {
    pub items: Vec<Issue>,
    pub pagination: PaginationInfo,
}
