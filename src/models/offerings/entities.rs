use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grading::AssessmentDefinition;

// 开课（某课程在某学年学期的一次开设）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/offering.ts")]
pub struct Offering {
    pub id: i64,
    pub course_code: String,
    pub course_title: String,
    pub session: String,
    pub semester: String,
    pub lecturer_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 考核项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/offering.ts")]
pub struct Assessment {
    pub id: i64,
    pub offering_id: i64,
    pub name: String,
    pub weight: f64,
    pub max_score: f64,
    pub position: i32,
}

impl From<&Assessment> for AssessmentDefinition {
    fn from(a: &Assessment) -> Self {
        AssessmentDefinition::new(a.id, a.name.clone(), a.weight, a.max_score)
    }
}

// 选课学生
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/offering.ts")]
pub struct RosterStudent {
    pub student_id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}
