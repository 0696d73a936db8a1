//! HTTP 中间件
//!
//! 提供请求日志、追踪 span 和指标收集的中间件。

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{Instrument, Level, debug, info, info_span, warn};

use super::metrics;

/// 请求体日志的最大缓冲大小，与 axum 默认的请求体限制一致
pub const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// 未匹配任何路由的请求使用的指标 path 标签
///
/// 不使用原始路径，否则任意 URL 都会产生新的时间序列。
pub const UNMATCHED_PATH_LABEL: &str = "<unmatched>";

/// HTTP 请求日志、追踪和指标中间件
///
/// 每个请求都会在 `http_request` span 中执行：
/// - info 级别记录方法和 URI
/// - debug 级别额外记录请求头和请求体
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware};
/// use backend_shared::observability::middleware::http_tracing;
///
/// let app = Router::new()
///     .route("/", get(health))
///     .layer(middleware::from_fn(http_tracing));
/// ```
pub async fn http_tracing(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let uri = request.uri().to_string();
    let path = metric_path(&request);
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();

    let span = info_span!(
        "http_request",
        method = %method,
        uri = %uri,
        request_id = %request_id,
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    let response = async {
        info!("{} {}", method, uri);
        match log_payload(request).await {
            Ok(request) => next.run(request).await,
            Err(response) => response,
        }
    }
    .instrument(span.clone())
    .await;

    let latency = start.elapsed();
    let status = response.status().as_u16();

    span.record("status", status);
    span.record("latency_ms", latency.as_millis() as i64);

    metrics::record_http_request(&method, &path, status, latency.as_secs_f64());

    response
}

/// 指标使用的 path 标签：路由模板，未匹配时为固定值
fn metric_path(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_PATH_LABEL, |p| p.as_str())
        .to_string()
}

/// debug 级别下记录请求头和请求体
///
/// 请求体需要完整缓冲后再放回请求中，超出限制时直接返回 413。
async fn log_payload(request: Request) -> Result<Request, Response> {
    if !tracing::enabled!(Level::DEBUG) {
        return Ok(request);
    }

    debug!(headers = ?request.headers(), "请求头");

    let (parts, body) = request.into_parts();
    match axum::body::to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => {
            if !bytes.is_empty() {
                debug!(body = %String::from_utf8_lossy(&bytes), "请求体");
            }
            Ok(Request::from_parts(parts, Body::from(bytes)))
        }
        Err(e) => {
            warn!(error = %e, "读取请求体失败");
            Err(StatusCode::PAYLOAD_TOO_LARGE.into_response())
        }
    }
}

/// 请求 ID 中间件
///
/// 为每个请求添加唯一 ID，便于日志关联。
/// 需要位于 `http_tracing` 外层，ID 才会出现在 `http_request` span 上。
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }

    response
}

/// 请求 ID 包装类型
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
