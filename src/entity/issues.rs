//! 学生问题反馈实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub offering_id: i64,
    pub student_id: i64,
    pub assessment_id: Option<i64>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub response: Option<String>,
    pub resolved_by: Option<i64>,
    pub created_at: i64,
    pub resolved_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::offerings::Entity",
        from = "Column::OfferingId",
        to = "super::offerings::Column::Id"
    )]
    Offering,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::offerings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offering.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，`student` 为关联查询得到的提问学生
    pub fn into_issue(
        self,
        student: Option<super::users::Model>,
    ) -> crate::models::issues::entities::Issue {
        use crate::models::issues::entities::{Issue, IssueStatus};
        use chrono::{DateTime, Utc};

        Issue {
            id: self.id,
            offering_id: self.offering_id,
            student_id: self.student_id,
            student_name: student.map(|s| s.display_name.unwrap_or(s.username)),
            assessment_id: self.assessment_id,
            title: self.title,
            description: self.description,
            status: self.status.parse::<IssueStatus>().unwrap_or(IssueStatus::Open),
            response: self.response,
            resolved_by: self.resolved_by,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            resolved_at: self
                .resolved_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
        }
    }
}
