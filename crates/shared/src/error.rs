//! 统一错误处理模块
//!
//! 定义 mock 后端所有共享的错误类型，使用 thiserror 提供良好的错误信息，
//! 并通过 `IntoResponse` 转换为 SDK 期望的 HTTP 响应。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 参与方查询未命中时返回的错误码
pub const PARTY_NOT_FOUND_CODE: &str = "3204";

/// 下游错误没有附带信息时的兜底提示
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// 系统错误类型
#[derive(Debug, Error)]
pub enum BackendError {
    // ==================== 启动错误 ====================
    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("数据集加载失败: {0}")]
    DatasetLoad(String),

    // ==================== 请求错误 ====================
    #[error("请求体不是合法的 JSON: {0}")]
    InvalidBody(String),

    #[error("请求体超出大小限制: {0}")]
    PayloadTooLarge(String),

    #[error("参与方不存在: {id_type}/{id_value}")]
    PartyNotFound { id_type: String, id_value: String },

    // ==================== 外部服务错误 ====================
    #[error("{0}")]
    Downstream(String),

    #[error("下游服务请求超时: {endpoint}")]
    DownstreamTimeout { endpoint: String },

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, BackendError>;

impl BackendError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::DatasetLoad(_) => "DATASET_LOAD_ERROR",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::PartyNotFound { .. } => "PARTY_NOT_FOUND",
            Self::Downstream(_) => "DOWNSTREAM_ERROR",
            Self::DownstreamTimeout { .. } => "DOWNSTREAM_TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::PartyNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Config(_)
            | Self::DatasetLoad(_)
            | Self::Downstream(_)
            | Self::DownstreamTimeout { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否由下游服务引起
    pub fn is_downstream(&self) -> bool {
        matches!(self, Self::Downstream(_) | Self::DownstreamTimeout { .. })
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            // SDK 只关心状态码，错误码沿用 FSPIOP 的 3204（Party not found）
            Self::PartyNotFound { .. } => json!({ "statusCode": PARTY_NOT_FOUND_CODE }),
            Self::Downstream(message) if message.trim().is_empty() => {
                json!({ "message": DEFAULT_ERROR_MESSAGE })
            }
            Self::InvalidBody(_)
            | Self::PayloadTooLarge(_)
            | Self::Downstream(_)
            | Self::DownstreamTimeout { .. } => {
                json!({ "message": self.to_string() })
            }
            // 启动类错误不应出现在请求路径上，详细信息只记日志
            Self::Config(_) | Self::DatasetLoad(_) | Self::Internal(_) => {
                tracing::error!(error = %self, code = self.code(), "内部错误");
                json!({ "message": DEFAULT_ERROR_MESSAGE })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// 从 JSON 解析错误转换
impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidBody(err.to_string())
    }
}
