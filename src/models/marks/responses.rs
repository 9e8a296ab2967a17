use super::entities::Mark;
use super::requests::EntryRejection;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub enum MarkEntryStatus {
    Accepted,
    Rejected,
}

// 单条录入项的处理结果，index 对应请求中的位置
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkEntryResult {
    pub index: usize,
    pub status: MarkEntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<Mark>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MarkEntryResult {
    pub fn accepted(index: usize, mark: Mark) -> Self {
        Self {
            index,
            status: MarkEntryStatus::Accepted,
            mark: Some(mark),
            field: None,
            message: None,
        }
    }

    pub fn rejected(index: usize, rejection: EntryRejection) -> Self {
        Self {
            index,
            status: MarkEntryStatus::Rejected,
            mark: None,
            field: Some(rejection.field),
            message: Some(rejection.message),
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct SubmitMarksResponse {
    pub offering_id: i64,
    pub accepted_count: usize,
    pub rejected_count: usize,
    pub results: Vec<MarkEntryResult>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct MarkListResponse {
    pub offering_id: i64,
    pub items: Vec<Mark>,
}
