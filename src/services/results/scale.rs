use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use super::sheet::load_scale;
use crate::grading::PASSING_THRESHOLD;
use crate::models::ApiResponse;
use crate::models::results::responses::GradingScaleResponse;
use crate::services::error_response;

/// 当前生效的评分等级表
pub async fn get_grading_scale(
    service: &ResultService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match load_scale(&storage).await {
        Ok((scale, is_default)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradingScaleResponse {
                is_default,
                passing_threshold: PASSING_THRESHOLD,
                bands: scale.bands().to_vec(),
            },
            "Grading scale retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to load grading scale", &e)),
    }
}
