use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grading::ScoreRecord;

// 已保存的成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/mark.ts")]
pub struct Mark {
    pub id: i64,
    #[serde(flatten)]
    #[ts(flatten)]
    pub record: ScoreRecord,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 写入成绩存储的一条记录，以 (assessment_id, student_id) 为键
pub type UpsertMark = ScoreRecord;
