//! HTTP Middleware
//!
//! HTTP 状态码错误日志中间件
//!
//! 注意：业务错误（errno != 0）在 ApiError::into_response() 中记录

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 拦截 HTTP 响应，状态码为 4xx / 5xx 时记录日志（含耗时）
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}
