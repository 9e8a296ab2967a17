use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::IssueService;
use crate::models::ApiResponse;
use crate::models::issues::requests::{IssueListQuery, IssueQueryParams};
use crate::services::offerings::load_accessible_offering;
use crate::services::{current_user, error_response};

/// 列出开课下学生提出的问题
pub async fn list_issues(
    service: &IssueService,
    request: &HttpRequest,
    offering_id: i64,
    query: IssueQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_accessible_offering(&storage, &user, offering_id).await {
        return Ok(resp);
    }

    let list_query = IssueListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        status: query.status,
    };

    match storage
        .list_issues_with_pagination(offering_id, list_query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Issues retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to list issues", &e)),
    }
}
