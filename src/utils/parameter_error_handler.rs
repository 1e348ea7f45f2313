//! 请求参数解析错误处理器
//!
//! 解析失败不能落到 actix 默认的纯文本响应上：
//! 常规接口回统一的 ApiResponse 信封，批量成绩录入回固定的
//! `{"error": ...}` 信封。

use actix_web::error::{Error, InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse};

use crate::models::grades::responses::BulkGradeError;
use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析错误处理器
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("请求体解析失败: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析错误处理器
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    let message = format!("查询参数解析失败: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}

/// 批量成绩录入的 JSON 解析错误处理器，保持 `{"error": ...}` 信封
pub fn bulk_json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    let response = HttpResponse::BadRequest().json(BulkGradeError {
        error: format!("请求体解析失败: {err}"),
    });
    InternalError::from_response(err, response).into()
}
