use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::ResultService;

static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

// 当前评分等级表
pub async fn get_grading_scale(req: HttpRequest) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_grading_scale(&req).await
}

pub fn configure_grading_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grading-scale")
            .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_grading_scale)),
    );
}
