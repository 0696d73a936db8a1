//! 统一可观测性模块
//!
//! 提供 logging 与 metrics 的统一初始化和管理。
//! 服务通过单一入口点配置可观测性，确保一致的日志格式和指标命名。

pub mod metrics;
pub mod middleware;
pub mod tracing;

use ::tracing::info;
use anyhow::Result;
use config::ConfigError;
use serde::Deserialize;

use crate::config::parse_env;

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// 服务名称，用于标识日志和指标的来源
    pub service_name: String,

    /// Prometheus 指标导出端口，为空时不启动导出服务
    pub metrics_port: Option<u16>,

    /// 日志级别（如 "info", "debug"），RUST_LOG 优先
    pub log_level: String,

    /// 是否启用 JSON 格式日志
    pub json_logs: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "mock-backend".to_string(),
            metrics_port: None,
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

impl ObservabilityConfig {
    /// 注入服务名
    pub fn with_service_name(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }

    /// 应用可观测性相关的环境变量（METRICS_PORT, JSON_LOGS）
    pub fn apply_env_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("METRICS_PORT") {
            self.metrics_port = Some(parse_env("METRICS_PORT", &port)?);
        }
        if let Some(json) = lookup("JSON_LOGS") {
            self.json_logs = json == "true" || json == "1";
        }
        Ok(())
    }
}

/// 可观测性资源守卫
///
/// 持有指标导出服务的生命周期。
pub struct ObservabilityGuard {
    _metrics_handle: Option<metrics::MetricsHandle>,
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        info!("Shutting down observability...");
    }
}

/// 统一初始化可观测性
///
/// 初始化顺序：
/// 1. Tracing（日志）
/// 2. Metrics（仅在配置了 metrics_port 时）
///
/// # Example
///
/// ```ignore
/// use backend_shared::observability::{init, ObservabilityConfig};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ObservabilityConfig::default().with_service_name("mock-backend");
///     let _guard = init(&config).await?;
///     Ok(())
/// }
/// ```
pub async fn init(config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    tracing::init(config)?;

    info!(
        service = %config.service_name,
        metrics_port = ?config.metrics_port,
        json_logs = config.json_logs,
        "Observability initialized"
    );

    let metrics_handle = match config.metrics_port {
        Some(port) => Some(metrics::init(&config.service_name, port).await?),
        None => None,
    };

    Ok(ObservabilityGuard {
        _metrics_handle: metrics_handle,
    })
}
