use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{OfferingService, load_accessible_offering};
use crate::models::ApiResponse;
use crate::models::offerings::responses::RosterResponse;
use crate::services::{current_user, error_response};

/// 选课名单
pub async fn list_students(
    service: &OfferingService,
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

    match storage.list_offering_students(offering_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RosterResponse { offering_id, items },
            "Roster retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to load roster", &e)),
    }
}
