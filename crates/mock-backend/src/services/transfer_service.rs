//! Incoming transfer 服务
//!
//! 只负责领取 home transaction id，请求体不参与任何逻辑。

use axum::{Json, Router, extract::State, routing::post};
use backend_shared::observability::metrics;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::extract::LenientJson;
use super::health::not_found;
use crate::models::TransferAck;
use crate::state::AppState;

/// 构建 incoming transfer 路由
pub fn transfer_routes() -> Router<Arc<AppState>> {
    Router::new().route("/transfers", post(accept_transfer).fallback(not_found))
}

/// 接收 incoming transfer 通知
///
/// POST /transfers
async fn accept_transfer(
    State(state): State<Arc<AppState>>,
    LenientJson(transfer): LenientJson<Value>,
) -> Json<TransferAck> {
    let home_transaction_id = state.counter.next_id();
    metrics::record_home_transaction();

    info!(home_transaction_id, "接收 incoming transfer");
    debug!(transfer_id = ?transfer.get("transferId"), "incoming transfer 详情");

    Json(TransferAck::new(home_transaction_id))
}
