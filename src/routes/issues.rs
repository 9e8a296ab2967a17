use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::issues::requests::ResolveIssueRequest;
use crate::models::users::entities::UserRole;
use crate::services::IssueService;
use crate::utils::SafeIDI64;

static ISSUE_SERVICE: Lazy<IssueService> = Lazy::new(IssueService::new_lazy);

// 解决问题
pub async fn resolve_issue(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<ResolveIssueRequest>,
) -> ActixResult<HttpResponse> {
    ISSUE_SERVICE
        .resolve_issue(&req, path.0, body.into_inner())
        .await
}

pub fn configure_issues_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/issues")
            .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("/{id}/resolve").route(web::put().to(resolve_issue))),
    );
}
