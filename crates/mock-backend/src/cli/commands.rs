//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构。

use backend_shared::config::{AppConfig, SendMode};
use clap::{Args, Parser, Subcommand};

/// Mock 后端命令行工具
///
/// 未指定子命令时等同于 `serve`。
#[derive(Parser, Debug)]
#[command(name = "mock-backend")]
#[command(version, about = "SDK scheme adapter 的模拟 DFSP 后端")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)，RUST_LOG 优先
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// 实际要执行的子命令
    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Serve(ServeArgs::default()))
    }
}

/// 子命令枚举
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 启动 HTTP 服务
    Serve(ServeArgs),

    /// 校验静态数据集并输出统计信息
    CheckData {
        /// 数据集文件路径（默认使用内置数据集）
        #[arg(short, long)]
        data: Option<String>,
    },
}

/// serve 子命令参数，覆盖配置文件和环境变量
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// 监听端口
    #[arg(short, long)]
    pub port: Option<u16>,

    /// 数据集文件路径
    #[arg(short, long)]
    pub data: Option<String>,

    /// /send 行为 (forward, noop)
    #[arg(long)]
    pub send_mode: Option<SendMode>,

    /// 下游服务基础地址
    #[arg(long)]
    pub outbound_endpoint: Option<String>,
}

impl ServeArgs {
    /// 将命令行参数写入配置
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data) = &self.data {
            config.data_file = Some(data.clone());
        }
        if let Some(mode) = self.send_mode {
            config.outbound.send_mode = mode;
        }
        if let Some(endpoint) = &self.outbound_endpoint {
            config.outbound.endpoint = endpoint.clone();
        }
    }
}

// ============================================================================
// 单元测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli::parse_from(["mock-backend"]);
        assert!(cli.log_level.is_none());
        match cli.command() {
            Commands::Serve(args) => {
                assert!(args.port.is_none());
                assert!(args.send_mode.is_none());
            }
            _ => panic!("预期 Serve 命令"),
        }
    }

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from([
            "mock-backend",
            "serve",
            "--port",
            "4000",
            "--data",
            "/data/parties.json",
            "--send-mode",
            "noop",
            "--outbound-endpoint",
            "http://localhost:4001",
        ]);

        match cli.command() {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(4000));
                assert_eq!(args.data.as_deref(), Some("/data/parties.json"));
                assert_eq!(args.send_mode, Some(SendMode::Noop));

                let mut config = AppConfig::default();
                args.apply_to(&mut config);
                assert_eq!(config.server.port, 4000);
                assert_eq!(config.outbound.send_mode, SendMode::Noop);
                assert_eq!(config.outbound.endpoint, "http://localhost:4001");
                assert_eq!(config.data_file.as_deref(), Some("/data/parties.json"));
            }
            _ => panic!("预期 Serve 命令"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_send_mode() {
        let result = Cli::try_parse_from(["mock-backend", "serve", "--send-mode", "relay"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_check_data() {
        let cli = Cli::parse_from(["mock-backend", "--log-level", "debug", "check-data", "-d", "x.json"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command() {
            Commands::CheckData { data } => assert_eq!(data.as_deref(), Some("x.json")),
            _ => panic!("预期 CheckData 命令"),
        }
    }

    #[test]
    fn test_empty_args_leave_config_untouched() {
        let mut config = AppConfig::default();
        ServeArgs::default().apply_to(&mut config);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.outbound.send_mode, SendMode::Forward);
    }
}
