use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::issues::requests::IssueQueryParams;
use crate::models::marks::requests::SubmitMarksRequest;
use crate::models::offerings::requests::OfferingQueryParams;
use crate::models::users::entities::UserRole;
use crate::services::{IssueService, MarkService, OfferingService, ResultService};
use crate::utils::SafeIDI64;

// 懒加载的全局服务实例
static OFFERING_SERVICE: Lazy<OfferingService> = Lazy::new(OfferingService::new_lazy);
static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);
static ISSUE_SERVICE: Lazy<IssueService> = Lazy::new(IssueService::new_lazy);

// 列出开课
pub async fn list_offerings(
    req: HttpRequest,
    query: web::Query<OfferingQueryParams>,
) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE
        .list_offerings(&req, query.into_inner())
        .await
}

// 开课详情
pub async fn get_offering(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE.get_offering(&req, path.0).await
}

// 选课名单
pub async fn list_students(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE.list_students(&req, path.0).await
}

// 已录入成绩
pub async fn list_marks(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_marks(&req, path.0).await
}

// 批量录入成绩
pub async fn submit_marks(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitMarksRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .submit_marks(&req, path.0, body.into_inner())
        .await
}

// 成绩单
pub async fn get_results(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_results(&req, path.0).await
}

// 班级统计
pub async fn get_statistics(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.get_statistics(&req, path.0).await
}

// 导出成绩单
pub async fn export_results(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.export_results(&req, path.0).await
}

// 开课下的问题反馈
pub async fn list_issues(
    req: HttpRequest,
    path: SafeIDI64,
    query: web::Query<IssueQueryParams>,
) -> ActixResult<HttpResponse> {
    ISSUE_SERVICE
        .list_issues(&req, path.0, query.into_inner())
        .await
}

// 配置路由，全部仅限授课教师和管理员，开课归属在业务层检查
pub fn configure_offerings_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/offerings")
            .wrap(middlewares::RequireRole::new_any(UserRole::lecturer_roles()))
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_offerings)))
            .service(web::resource("/{id}").route(web::get().to(get_offering)))
            .service(web::resource("/{id}/students").route(web::get().to(list_students)))
            .service(
                web::resource("/{id}/marks")
                    .route(web::get().to(list_marks))
                    .route(web::post().to(submit_marks)),
            )
            .service(web::resource("/{id}/results").route(web::get().to(get_results)))
            .service(web::resource("/{id}/results/export").route(web::get().to(export_results)))
            .service(web::resource("/{id}/statistics").route(web::get().to(get_statistics)))
            .service(web::resource("/{id}/issues").route(web::get().to(list_issues))),
    );
}
