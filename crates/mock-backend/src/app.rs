//! HTTP 应用组装
//!
//! 合并各服务路由，挂载默认 404 与请求日志中间件。

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use backend_shared::observability::middleware::{http_tracing, request_id};

use crate::services::{
    health_check, not_found, party_routes, quote_routes, send_routes, transfer_routes,
};
use crate::state::AppState;

/// 构建完整的应用路由
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check).fallback(not_found))
        .merge(party_routes())
        .merge(quote_routes())
        .merge(transfer_routes())
        .merge(send_routes())
        .fallback(not_found)
        .layer(middleware::from_fn(http_tracing))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}
