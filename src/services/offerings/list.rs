use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::OfferingService;
use crate::models::offerings::requests::{OfferingListQuery, OfferingQueryParams};
use crate::models::users::entities::UserRole;
use crate::models::ApiResponse;
use crate::services::{current_user, error_response};

/// 列出开课，教师只看到自己的开课
pub async fn list_offerings(
    service: &OfferingService,
    request: &HttpRequest,
    query: OfferingQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let list_query = OfferingListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        lecturer_id: (user.role != UserRole::Admin).then_some(user.id),
        search: query.search,
    };

    match storage.list_offerings_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Offerings retrieved successfully",
        ))),
        Err(e) => Ok(error_response("Failed to list offerings", &e)),
    }
}
