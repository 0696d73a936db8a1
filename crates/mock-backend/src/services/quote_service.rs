//! 报价服务
//!
//! 永远返回零手续费报价，不修改共享状态。

use axum::{Json, Router, routing::post};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use super::extract::LenientJson;
use super::health::not_found;
use crate::models::{QuoteRequest, QuoteResponse};
use crate::state::AppState;

/// 构建报价路由
pub fn quote_routes() -> Router<Arc<AppState>> {
    Router::new().route("/quoterequests", post(create_quote).fallback(not_found))
}

/// 报价请求
///
/// POST /quoterequests
async fn create_quote(LenientJson(req): LenientJson<QuoteRequest>) -> Json<QuoteResponse> {
    let quote = QuoteResponse::zero_fee(req, Utc::now());

    info!(
        quote_id = ?quote.quote_id,
        transaction_id = ?quote.transaction_id,
        amount = ?quote.transfer_amount,
        currency = ?quote.transfer_amount_currency,
        "生成零手续费报价"
    );

    Json(quote)
}
