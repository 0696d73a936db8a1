//! 健康检查与默认路由

use axum::http::StatusCode;

/// 健康检查端点
///
/// GET / ，无条件返回 200 空响应体
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// 未匹配的路径或方法统一返回 404 空响应体
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
