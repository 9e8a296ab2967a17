//! 路径参数提取器
//!
//! 路由里的 `{id}` 必须是正整数，否则直接返回 400 的统一错误响应，
//! 处理函数拿到的一定是合法 ID。

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError, http::StatusCode,
};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// `{id}` 路径参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

fn parse_positive_id(raw: Option<&str>) -> Option<i64> {
    raw?.parse::<i64>().ok().filter(|id| *id > 0)
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let raw = req.match_info().get("id");
        ready(match parse_positive_id(raw) {
            Some(id) => Ok(SafeIDI64(id)),
            None => {
                let message = format!("Invalid id: {}", raw.unwrap_or(""));
                let response = HttpResponse::build(StatusCode::BAD_REQUEST)
                    .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
                Err(InternalError::from_response(message, response).into())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_positive_integers_are_ids() {
        assert_eq!(parse_positive_id(Some("12")), Some(12));
        assert_eq!(parse_positive_id(Some("0")), None);
        assert_eq!(parse_positive_id(Some("-3")), None);
        assert_eq!(parse_positive_id(Some("1e3")), None);
        assert_eq!(parse_positive_id(None), None);
    }
}
