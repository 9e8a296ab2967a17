use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use super::sheet::load_sheet;
use crate::models::ApiResponse;
use crate::models::results::responses::OfferingStatisticsResponse;
use crate::services::offerings::load_accessible_offering;
use crate::services::{current_user, error_response};

/// 班级成绩统计
pub async fn get_statistics(
    service: &ResultService,
    request: &HttpRequest,
    offering_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_accessible_offering(&storage, &user, offering_id).await {
        return Ok(resp);
    }

    match load_sheet(&storage, offering_id).await {
        Ok(sheet) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            OfferingStatisticsResponse {
                offering_id,
                statistics: sheet.statistics,
            },
            "Statistics computed successfully",
        ))),
        Err(e) => Ok(error_response("Failed to compute statistics", &e)),
    }
}
