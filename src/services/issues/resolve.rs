use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::IssueService;
use crate::models::issues::{entities::IssueStatus, requests::ResolveIssueRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::offerings::load_accessible_offering;
use crate::services::{current_user, error_response};

fn already_resolved() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::IssueAlreadyResolved,
        "Issue is already resolved",
    ))
}

/// 回复并关闭问题，每个问题只能解决一次
pub async fn resolve_issue(
    service: &IssueService,
    request: &HttpRequest,
    issue_id: i64,
    body: ResolveIssueRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let response_text = body.response.trim();
    if response_text.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "response must not be empty",
        )));
    }

    let issue = match storage.get_issue_by_id(issue_id).await {
        Ok(Some(issue)) => issue,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::IssueNotFound,
                "Issue not found",
            )));
        }
        Err(e) => return Ok(error_response("Failed to load issue", &e)),
    };

    if let Err(resp) = load_accessible_offering(&storage, &user, issue.offering_id).await {
        return Ok(resp);
    }

    if issue.status == IssueStatus::Resolved {
        return Ok(already_resolved());
    }

    match storage.resolve_issue(issue_id, user.id, response_text).await {
        Ok(Some(resolved)) => {
            info!("User {} resolved issue {}", user.id, issue_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(resolved, "Issue resolved")))
        }
        // 并发请求已先一步解决
        Ok(None) => Ok(already_resolved()),
        Err(e) => Ok(error_response("Failed to resolve issue", &e)),
    }
}
