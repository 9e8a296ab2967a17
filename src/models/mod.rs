pub mod auth;
pub mod common;
pub mod issues;
pub mod marks;
pub mod offerings;
pub mod results;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery, page_bounds};

/// 业务错误码，随 `ApiResponse.code` 一起返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,

    // 认证
    AuthFailed = 2000,
    UserNotFound = 2001,
    UserInactive = 2002,

    // 开课
    OfferingNotFound = 3000,
    OfferingPermissionDenied = 3001,

    // 成绩录入与评分
    MarkEntryInvalid = 4000,
    MarkBatchTooLarge = 4001,
    GradingScaleInvalid = 4002,

    // 问题反馈
    IssueNotFound = 5000,
    IssueAlreadyResolved = 5001,
}

