//! 宽松的 JSON 请求体提取器
//!
//! 与 `axum::Json` 不同，不检查 Content-Type：任何声明类型的请求体都按 JSON 解析。
//! 空请求体视为 `{}`。超出 axum 默认请求体限制时返回 413。

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use backend_shared::error::BackendError;
use serde::de::DeserializeOwned;

/// 忽略 Content-Type 的 JSON 提取器
#[derive(Debug, Clone)]
pub struct LenientJson<T>(pub T);

impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => BackendError::PayloadTooLarge(e.body_text()),
                _ => BackendError::InvalidBody(e.body_text()),
            })?;

        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        Ok(Self(serde_json::from_slice(raw)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;
    use serde_json::{Value, json};

    async fn extract(body: impl Into<Body>, content_type: Option<&str>) -> Result<Value, BackendError> {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(body.into()).unwrap();
        LenientJson::<Value>::from_request(request, &())
            .await
            .map(|LenientJson(v)| v)
    }

    #[tokio::test]
    async fn test_accepts_any_content_type() {
        assert_eq!(
            extract(r#"{"a":1}"#, Some("text/plain")).await.unwrap(),
            json!({ "a": 1 })
        );
        assert_eq!(
            extract(r#"{"a":1}"#, Some("application/vnd.interoperability.quotes+json;version=1.0"))
                .await
                .unwrap(),
            json!({ "a": 1 })
        );
        assert_eq!(extract(r#"[1,2]"#, None).await.unwrap(), json!([1, 2]));
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_object() {
        assert_eq!(extract("", None).await.unwrap(), json!({}));
        assert_eq!(extract("  \n", None).await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let err = extract("{not json", Some("application/json")).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_oversized_body_is_payload_too_large() {
        // axum 默认请求体限制为 2MB
        let body = vec![b' '; 2 * 1024 * 1024 + 1];
        let err = extract(body, Some("application/json")).await.unwrap_err();

        assert_eq!(err.code(), "PAYLOAD_TOO_LARGE");
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
