//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::observability::ObservabilityConfig;

/// 监听端口环境变量
pub const LISTEN_PORT_ENV: &str = "LISTEN_PORT";
/// 下游服务地址环境变量
pub const OUTBOUND_ENDPOINT_ENV: &str = "OUTBOUND_ENDPOINT";
/// `/send` 行为环境变量（forward / noop）
pub const SEND_MODE_ENV: &str = "SEND_MODE";
/// 下游请求超时（毫秒）环境变量
pub const OUTBOUND_TIMEOUT_ENV: &str = "OUTBOUND_TIMEOUT_MS";
/// 静态数据集文件路径环境变量
pub const DATA_FILE_ENV: &str = "DATA_FILE";

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// `/send` 的处理方式
///
/// - `Forward`: 转发到下游服务的 `/transfers`
/// - `Noop`: 直接返回空响应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendMode {
    #[default]
    Forward,
    Noop,
}

impl FromStr for SendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "noop" | "no-op" => Ok(Self::Noop),
            other => Err(format!("未知的 send 模式: {other}（可选 forward, noop）")),
        }
    }
}

impl fmt::Display for SendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Noop => write!(f, "noop"),
        }
    }
}

/// 下游（outbound）服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutboundConfig {
    /// 下游服务基础地址，转发目标为 `{endpoint}/transfers`
    pub endpoint: String,
    pub send_mode: SendMode,
    /// 单次转发的超时时间
    pub timeout_ms: u64,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://scheme-adapter:4001".to_string(),
            send_mode: SendMode::Forward,
            timeout_ms: 30_000,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub outbound: OutboundConfig,
    /// 为空时使用编译期内置的数据集
    pub data_file: Option<String>,
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "mock-backend".to_string(),
            environment: "development".to_string(),
            server: ServerConfig::default(),
            outbound: OutboundConfig::default(),
            data_file: None,
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（MOCK_BACKEND 前缀，如 MOCK_BACKEND__OUTBOUND__TIMEOUT_MS -> outbound.timeout_ms）
    /// 5. 服务约定的环境变量（LISTEN_PORT, OUTBOUND_ENDPOINT 等）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        // .env 文件可选，不存在时忽略
        let _ = dotenvy::dotenv();

        let env = std::env::var("MOCK_ENV").unwrap_or_else(|_| "development".to_string());

        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(Path::new(&config_dir).join("default.toml")).required(false))
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", env))).required(false),
            )
            .add_source(
                File::from(Path::new(&config_dir).join(format!("{}.toml", service_name)))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("MOCK_BACKEND")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.observability.service_name = config.service_name.clone();

        Ok(config)
    }

    /// 应用服务约定的环境变量
    ///
    /// 这些变量优先级最高，`lookup` 便于测试时注入。
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(LISTEN_PORT_ENV) {
            self.server.port = parse_env(LISTEN_PORT_ENV, &port)?;
        }
        if let Some(endpoint) = lookup(OUTBOUND_ENDPOINT_ENV) {
            self.outbound.endpoint = endpoint;
        }
        if let Some(mode) = lookup(SEND_MODE_ENV) {
            self.outbound.send_mode = mode
                .parse()
                .map_err(|e: String| ConfigError::Message(format!("{SEND_MODE_ENV}: {e}")))?;
        }
        if let Some(timeout) = lookup(OUTBOUND_TIMEOUT_ENV) {
            self.outbound.timeout_ms = parse_env(OUTBOUND_TIMEOUT_ENV, &timeout)?;
        }
        if let Some(path) = lookup(DATA_FILE_ENV) {
            self.data_file = Some(path).filter(|p| !p.is_empty());
        }

        self.observability.apply_env_overrides(&lookup)
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 解析数值型环境变量，失败时带上变量名
pub(crate) fn parse_env<T: FromStr>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::Message(format!("环境变量 {name}={raw} 无效: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.outbound.endpoint, "http://scheme-adapter:4001");
        assert_eq!(config.outbound.send_mode, SendMode::Forward);
        assert_eq!(config.outbound.timeout_ms, 30_000);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 4000,
            },
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:4000");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(lookup_from(&[
                ("LISTEN_PORT", "8081"),
                ("OUTBOUND_ENDPOINT", "http://localhost:4001"),
                ("SEND_MODE", "noop"),
                ("OUTBOUND_TIMEOUT_MS", "500"),
                ("DATA_FILE", "/tmp/data.json"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.outbound.endpoint, "http://localhost:4001");
        assert_eq!(config.outbound.send_mode, SendMode::Noop);
        assert_eq!(config.outbound.timeout_ms, 500);
        assert_eq!(config.data_file.as_deref(), Some("/tmp/data.json"));
    }

    #[test]
    fn test_env_overrides_absent_keeps_defaults() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(lookup_from(&[])).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.outbound.send_mode, SendMode::Forward);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(lookup_from(&[("LISTEN_PORT", "not-a-port")]))
            .unwrap_err();
        assert!(err.to_string().contains("LISTEN_PORT"));
    }

    #[test]
    fn test_invalid_send_mode_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(lookup_from(&[("SEND_MODE", "broadcast")]))
            .unwrap_err();
        assert!(err.to_string().contains("SEND_MODE"));
    }

    #[test]
    fn test_send_mode_parse() {
        assert_eq!("forward".parse::<SendMode>().unwrap(), SendMode::Forward);
        assert_eq!("NOOP".parse::<SendMode>().unwrap(), SendMode::Noop);
        assert_eq!("no-op".parse::<SendMode>().unwrap(), SendMode::Noop);
        assert!("relay".parse::<SendMode>().is_err());
        assert_eq!(SendMode::Noop.to_string(), "noop");
    }
}
