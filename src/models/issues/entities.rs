use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/issue.ts")]
pub enum IssueStatus {
    Open,
    Resolved,
}

impl<'de> Deserialize<'de> for IssueStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!("无效的问题状态: '{s}'. 支持的状态: open, resolved"))
        })
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueStatus::Open => write!(f, "open"),
            IssueStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl std::str::FromStr for IssueStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(IssueStatus::Open),
            "resolved" => Ok(IssueStatus::Resolved),
            _ => Err(format!("Invalid issue status: {s}")),
        }
    }
}

// 学生对成绩提出的问题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/issue.ts")]
pub struct Issue {
    pub id: i64,
    pub offering_id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub assessment_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub response: Option<String>,
    pub resolved_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}
