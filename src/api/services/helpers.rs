//! HTTP 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, error, web};
use serde::Serialize;
use tracing::error;

use crate::errors::AbbrError;

use super::types::{DataResponse, ErrorResponse, SuccessResponse};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// `{success: true, data}`
pub fn data_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(
        StatusCode::OK,
        &DataResponse {
            success: true,
            data,
        },
    )
}

/// `{success: true}`
pub fn ok_response() -> HttpResponse {
    json_response(StatusCode::OK, &SuccessResponse { success: true })
}

/// `{success: false, error}`
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response(
        status,
        &ErrorResponse {
            success: false,
            error: message.to_string(),
        },
    )
}

/// 从 AbbrError 构建错误响应；存储错误只记日志，不向客户端暴露细节
pub fn error_from_abbr(err: &AbbrError) -> HttpResponse {
    if err.http_status().is_server_error() {
        error!("{}", err.format_simple());
    }
    error_response(err.http_status(), err.public_message())
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: Result<T, AbbrError>) -> HttpResponse {
    match result {
        Ok(data) => data_response(data),
        Err(e) => error_from_abbr(&e),
    }
}

/// JSON 请求体解析失败时返回统一的 400
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            &format!("Invalid JSON body: {}", err),
        );
        error::InternalError::from_response(err, response).into()
    })
}

/// 查询参数解析失败（例如 page=abc）时返回统一的 400
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let response = error_response(
            StatusCode::BAD_REQUEST,
            &format!("Invalid query parameters: {}", err),
        );
        error::InternalError::from_response(err, response).into()
    })
}
