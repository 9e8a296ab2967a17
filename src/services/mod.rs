pub mod auth;
pub mod issues;
pub mod marks;
pub mod offerings;
pub mod results;

pub use auth::AuthService;
pub use issues::IssueService;
pub use marks::MarkService;
pub use offerings::OfferingService;
pub use results::ResultService;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::error;

use crate::errors::GradelyError;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

// 从 app data 中取出存储，服务实例是懒加载的全局对象，不直接持有存储
pub(crate) fn storage_from_request(
    storage: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> Arc<dyn Storage> {
    if let Some(storage) = storage {
        storage.clone()
    } else {
        request
            .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
            .expect("Storage not found in app data")
            .get_ref()
            .clone()
    }
}

// 当前登录用户，RequireJWT 之外调用时返回 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unable to get user information",
        ))
    })
}

// 业务错误转换为 HTTP 响应
pub(crate) fn error_response(context: &str, e: &GradelyError) -> HttpResponse {
    match e {
        e if e.is_grading_input_error() || matches!(e, GradelyError::Validation(_)) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::MarkEntryInvalid,
                format!("{context}: {e}"),
            ))
        }
        GradelyError::NotFound(_) => HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::NotFound,
            format!("{context}: {e}"),
        )),
        GradelyError::InvalidGradingScale(_) => {
            error!("{}: {}", context, e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::GradingScaleInvalid,
                format!("{context}: {e}"),
            ))
        }
        _ => {
            error!("{}: {}", context, e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {e}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (GradelyError::invalid_score("x"), StatusCode::BAD_REQUEST),
            (GradelyError::not_found("x"), StatusCode::NOT_FOUND),
            (
                GradelyError::invalid_grading_scale("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                GradelyError::database_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(error_response("ctx", &err).status(), status);
        }
    }
}
