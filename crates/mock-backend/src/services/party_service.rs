//! 参与方查询服务
//!
//! 按 (idType, idValue) 查询静态数据集，命中时原样返回记录。

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use backend_shared::error::BackendError;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::health::not_found;
use crate::state::AppState;

/// 构建参与方查询路由
pub fn party_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/parties/{id_type}/{id_value}",
        get(get_party).fallback(not_found),
    )
}

/// 查询参与方
///
/// GET /parties/:id_type/:id_value
async fn get_party(
    State(state): State<Arc<AppState>>,
    Path((id_type, id_value)): Path<(String, String)>,
) -> Result<Json<Value>, BackendError> {
    match state.dataset.party(&id_type, &id_value) {
        Some(party) => {
            info!(id_type = %id_type, id_value = %id_value, "查询参与方");
            Ok(Json(party.clone()))
        }
        None => {
            warn!(id_type = %id_type, id_value = %id_value, "参与方不存在");
            Err(BackendError::PartyNotFound { id_type, id_value })
        }
    }
}
