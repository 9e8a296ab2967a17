use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ResultService;
use super::sheet::load_sheet;
use crate::grading::PASSING_THRESHOLD;
use crate::models::ApiResponse;
use crate::models::results::responses::OfferingResultsResponse;
use crate::services::offerings::load_accessible_offering;
use crate::services::{current_user, error_response};

/// 开课成绩单：每个学生的分项成绩、总分、等级与是否及格，附班级统计
pub async fn get_results(
    service: &ResultService,
    request: &HttpRequest,
    offering_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let offering = match load_accessible_offering(&storage, &user, offering_id).await {
        Ok(offering) => offering,
        Err(resp) => return Ok(resp),
    };

    match load_sheet(&storage, offering_id).await {
        Ok(sheet) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            OfferingResultsResponse {
                offering_id,
                course_code: offering.course_code,
                passing_threshold: PASSING_THRESHOLD,
                is_default_scale: sheet.is_default_scale,
                results: sheet.results,
                statistics: sheet.statistics,
            },
            "Results computed successfully",
        ))),
        Err(e) => Ok(error_response("Failed to compute results", &e)),
    }
}
