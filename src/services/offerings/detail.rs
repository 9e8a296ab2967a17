use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{OfferingService, load_accessible_offering};
use crate::models::ApiResponse;
use crate::models::offerings::responses::OfferingDetailResponse;
use crate::services::{current_user, error_response};

/// 开课详情及其考核项
pub async fn get_offering(
    service: &OfferingService,
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

    match storage.list_assessments_by_offering(offering_id).await {
        Ok(assessments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            OfferingDetailResponse {
                offering,
                assessments,
            },
            "Offering retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to load assessments", &e)),
    }
}
