//! Outgoing transfer 发送服务
//!
//! forward 模式下把请求体转发给下游 `/transfers` 并回传响应体；
//! noop 模式下直接返回 200 空响应。

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use backend_shared::error::BackendError;
use backend_shared::observability::metrics;
use serde_json::Value;
use tracing::{error, info};

use super::extract::LenientJson;
use super::health::not_found;
use crate::state::AppState;

/// 构建发送路由
pub fn send_routes() -> Router<Arc<AppState>> {
    Router::new().route("/send", post(send_transfer).fallback(not_found))
}

/// 发送 outgoing transfer
///
/// POST /send
async fn send_transfer(
    State(state): State<Arc<AppState>>,
    LenientJson(transfer): LenientJson<Value>,
) -> Result<Response, BackendError> {
    let Some(client) = state.outbound.as_ref() else {
        info!("send 处于 noop 模式，忽略请求");
        return Ok(StatusCode::OK.into_response());
    };

    let start = Instant::now();
    match client.forward_transfer(&transfer).await {
        Ok(downstream) => {
            metrics::record_outbound_forward("success", start.elapsed().as_secs_f64());
            info!(
                url = %client.transfers_url(),
                status = %downstream.status,
                "outgoing transfer 转发成功"
            );
            Ok(downstream.into_response())
        }
        Err(e) => {
            let outcome = match &e {
                BackendError::DownstreamTimeout { .. } => "timeout",
                _ => "failed",
            };
            metrics::record_outbound_forward(outcome, start.elapsed().as_secs_f64());
            error!(url = %client.transfers_url(), error = %e, "outgoing transfer 转发失败");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Dataset, HomeTransactionCounter};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_noop_mode_returns_empty_ok() {
        let state = Arc::new(AppState::new(
            Arc::new(Dataset::default()),
            Arc::new(HomeTransactionCounter::new()),
            None,
        ));
        let app = send_routes().with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/send")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"amount":"10","currency":"XOF"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
