//! 开课访问控制
//!
//! 管理员可访问任意开课，授课教师只能访问自己的开课。

use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::{error, info};

use crate::models::offerings::entities::Offering;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) fn can_manage(user: &User, offering: &Offering) -> bool {
    match user.role {
        UserRole::Admin => true,
        UserRole::Lecturer => offering.lecturer_id == user.id,
        UserRole::Student => false,
    }
}

/// 加载开课并检查当前用户是否有权操作
pub(crate) async fn load_accessible_offering(
    storage: &Arc<dyn Storage>,
    user: &User,
    offering_id: i64,
) -> Result<Offering, HttpResponse> {
    let offering = match storage.get_offering_by_id(offering_id).await {
        Ok(Some(offering)) => offering,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::OfferingNotFound,
                "Offering not found",
            )));
        }
        Err(e) => {
            error!("查询开课 {} 失败: {}", offering_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load offering: {e}"),
                )),
            );
        }
    };

    if !can_manage(user, &offering) {
        info!(
            "User {} denied access to offering {} (lecturer {})",
            user.id, offering.id, offering.lecturer_id
        );
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::OfferingPermissionDenied,
            "You do not teach this offering",
        )));
    }

    Ok(offering)
}
