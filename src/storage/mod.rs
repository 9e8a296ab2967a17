use std::sync::Arc;

use crate::grading::GradeBand;
use crate::models::{
    issues::{entities::Issue, requests::IssueListQuery, responses::IssueListResponse},
    marks::entities::{Mark, UpsertMark},
    offerings::{
        entities::{Assessment, Offering, RosterStudent},
        requests::OfferingListQuery,
        responses::OfferingListResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 成绩存储
    // 按 (assessment_id, student_id) 写入或覆盖成绩，返回落库后的记录
    async fn upsert_mark(&self, mark: UpsertMark) -> Result<Mark>;
    // 读取单条成绩
    async fn get_mark(&self, assessment_id: i64, student_id: i64) -> Result<Option<Mark>>;
    // 列出开课的全部成绩
    async fn list_marks_by_offering(&self, offering_id: i64) -> Result<Vec<Mark>>;

    /// 评分等级
    // 按顺序列出已配置的评分等级，为空表示使用默认表
    async fn list_grade_bands(&self) -> Result<Vec<GradeBand>>;

    /// 用户管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn count_users(&self) -> Result<u64>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 开课
    async fn list_offerings_with_pagination(
        &self,
        query: OfferingListQuery,
    ) -> Result<OfferingListResponse>;
    async fn get_offering_by_id(&self, offering_id: i64) -> Result<Option<Offering>>;
    // 选课名单
    async fn list_offering_students(&self, offering_id: i64) -> Result<Vec<RosterStudent>>;
    async fn is_student_enrolled(&self, offering_id: i64, student_id: i64) -> Result<bool>;
    // 考核项，按 position 排序
    async fn list_assessments_by_offering(&self, offering_id: i64) -> Result<Vec<Assessment>>;

    /// 问题反馈
    async fn list_issues_with_pagination(
        &self,
        offering_id: i64,
        query: IssueListQuery,
    ) -> Result<IssueListResponse>;
    async fn get_issue_by_id(&self, issue_id: i64) -> Result<Option<Issue>>;
    // 仅处理 open 状态的问题，已解决时返回 None
    async fn resolve_issue(
        &self,
        issue_id: i64,
        resolver_id: i64,
        response: &str,
    ) -> Result<Option<Issue>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
