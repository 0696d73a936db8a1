//! 下游 HTTP 客户端
//!
//! 单次请求，不重试；超时由配置控制，避免下游无响应时长期占用连接。

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use backend_shared::config::OutboundConfig;
use backend_shared::error::{BackendError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, warn};

/// 转发请求携带的 User-Agent
pub const OUTBOUND_USER_AGENT: &str = "Mojaloop SDK";

/// 构建转发请求头
///
/// Date 使用 HTTP-date（IMF-fixdate）格式，如 `Sun, 06 Nov 1994 08:49:37 GMT`。
pub fn build_headers(now: DateTime<Utc>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_static(OUTBOUND_USER_AGENT),
    );

    let date = now.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
    if let Ok(value) = HeaderValue::from_str(&date) {
        headers.insert(header::DATE, value);
    }

    headers
}

/// 下游成功响应
#[derive(Debug, Clone)]
pub struct DownstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl DownstreamResponse {
    /// 尝试按 JSON 解析响应体
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// 原样回传下游响应体，状态码统一为 200
impl IntoResponse for DownstreamResponse {
    fn into_response(self) -> Response {
        if self.body.is_empty() {
            return StatusCode::OK.into_response();
        }

        let content_type = self
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));

        (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

/// 下游服务客户端
#[derive(Debug, Clone)]
pub struct OutboundClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl OutboundClient {
    /// 按配置创建客户端
    pub fn new(config: &OutboundConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Internal(format!("创建 HTTP 客户端失败: {e}")))?;

        Ok(Self {
            http,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 转发目标地址
    pub fn transfers_url(&self) -> String {
        format!("{}/transfers", self.base_url)
    }

    /// 将 outgoing transfer 转发到下游
    ///
    /// 连接失败、超时以及非 2xx 响应都作为错误返回。
    pub async fn forward_transfer(&self, body: &Value) -> Result<DownstreamResponse> {
        let url = self.transfers_url();
        debug!(url = %url, "转发 outgoing transfer");

        let response = self
            .http
            .post(&url)
            .headers(build_headers(Utc::now()))
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        if !status.is_success() {
            warn!(url = %url, status = %status, "下游服务返回错误状态");
            return Err(BackendError::Downstream(format!(
                "下游服务返回 HTTP {}",
                status.as_u16()
            )));
        }

        debug!(url = %url, status = %status, bytes = body.len(), "下游服务响应");

        Ok(DownstreamResponse {
            status,
            content_type,
            body,
        })
    }

    fn map_send_error(&self, url: &str, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            warn!(url = %url, timeout_ms = self.timeout.as_millis() as u64, "下游服务请求超时");
            BackendError::DownstreamTimeout {
                endpoint: url.to_string(),
            }
        } else {
            warn!(url = %url, error = %err, "下游服务请求失败");
            BackendError::Downstream(err.to_string())
        }
    }
}
