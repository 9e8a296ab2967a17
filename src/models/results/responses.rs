use serde::Serialize;
use ts_rs::TS;

use crate::grading::{ClassStatistics, GradeBand};

// 单个考核项得分，未录入时 score 为 null
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct AssessmentScore {
    pub assessment_id: i64,
    pub name: String,
    pub max_score: f64,
    pub score: Option<f64>,
}

// 学生总评
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct StudentResult {
    pub student_id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub scores: Vec<AssessmentScore>,
    pub total: f64,
    pub grade: String,
    pub grade_point: f64,
    pub passed: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct OfferingResultsResponse {
    pub offering_id: i64,
    pub course_code: String,
    pub passing_threshold: f64,
    pub is_default_scale: bool,
    pub results: Vec<StudentResult>,
    pub statistics: ClassStatistics,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct OfferingStatisticsResponse {
    pub offering_id: i64,
    pub statistics: ClassStatistics,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct GradingScaleResponse {
    /// 未配置评分等级时使用内置默认表
    pub is_default: bool,
    pub passing_threshold: f64,
    pub bands: Vec<GradeBand>,
}
