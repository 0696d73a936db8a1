//! CLI 模块
//!
//! 提供命令行接口：
//!
//! - `serve` - 启动 Mock HTTP 服务（默认）
//! - `check-data` - 校验静态数据集
//!
//! # 使用示例
//!
//! ```bash
//! # 启动服务器
//! LISTEN_PORT=3000 OUTBOUND_ENDPOINT=http://scheme-adapter:4001 mock-backend serve
//!
//! # 不转发 /send
//! mock-backend serve --send-mode noop
//!
//! # 校验自定义数据集
//! mock-backend check-data -d ./data.json
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands, ServeArgs};
pub use runner::CommandRunner;
