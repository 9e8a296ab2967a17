use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MarkService;
use crate::models::ApiResponse;
use crate::models::marks::responses::MarkListResponse;
use crate::services::offerings::load_accessible_offering;
use crate::services::{current_user, error_response};

/// 开课下已录入的全部成绩
pub async fn list_marks(
    service: &MarkService,
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

    match storage.list_marks_by_offering(offering_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkListResponse { offering_id, items },
            "Marks retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to load marks", &e)),
    }
}
