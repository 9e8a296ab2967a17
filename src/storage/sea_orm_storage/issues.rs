use super::SeaOrmStorage;
use crate::entity::issues::{Column, Entity as Issues};
use crate::entity::users::Entity as Users;
use crate::errors::{GradelyError, Result};
use crate::models::{
    PaginationInfo, page_bounds,
    issues::{
        entities::{Issue, IssueStatus},
        requests::IssueListQuery,
        responses::IssueListResponse,
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 分页列出开课下的问题，附带提问学生姓名
    pub async fn list_issues_with_pagination_impl(
        &self,
        offering_id: i64,
        query: IssueListQuery,
    ) -> Result<IssueListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Issues::find()
            .find_also_related(Users)
            .filter(Column::OfferingId.eq(offering_id));

        // 状态筛选
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询问题总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询问题页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询问题列表失败: {e}")))?;

        Ok(IssueListResponse {
            items: rows
                .into_iter()
                .map(|(issue, student)| issue.into_issue(student))
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 通过 ID 获取问题
    pub async fn get_issue_by_id_impl(&self, issue_id: i64) -> Result<Option<Issue>> {
        let result = Issues::find_by_id(issue_id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("查询问题失败: {e}")))?;

        Ok(result.map(|(issue, student)| issue.into_issue(student)))
    }

    /// 解决问题
    ///
    /// 条件更新只命中 open 状态的记录，未命中时返回 None。
    pub async fn resolve_issue_impl(
        &self,
        issue_id: i64,
        resolver_id: i64,
        response: &str,
    ) -> Result<Option<Issue>> {
        let now = chrono::Utc::now().timestamp();

        let result = Issues::update_many()
            .col_expr(Column::Status, Expr::value(IssueStatus::Resolved.to_string()))
            .col_expr(Column::Response, Expr::value(response.to_string()))
            .col_expr(Column::ResolvedBy, Expr::value(resolver_id))
            .col_expr(Column::ResolvedAt, Expr::value(now))
            .filter(
                Condition::all()
                    .add(Column::Id.eq(issue_id))
                    .add(Column::Status.eq(IssueStatus::Open.to_string())),
            )
            .exec(&self.db)
            .await
            .map_err(|e| GradelyError::database_operation(format!("更新问题状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_issue_by_id_impl(issue_id).await
    }
}
