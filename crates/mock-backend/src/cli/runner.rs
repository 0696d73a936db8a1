//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑。

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use backend_shared::config::AppConfig;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::app::build_router;
use crate::state::AppState;
use crate::store::Dataset;

/// 命令执行器
///
/// 持有合并后的配置，作为 CLI 与服务逻辑之间的桥梁。
pub struct CommandRunner {
    config: AppConfig,
}

impl CommandRunner {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// 执行 serve 命令
    ///
    /// 加载数据集、组装路由，收到 SIGTERM 或 Ctrl+C 后停止接收新连接，
    /// 等待进行中的请求完成后退出。
    pub async fn run_server(&self) -> Result<()> {
        let dataset = load_dataset(self.config.data_file.as_deref())?;
        let stats = dataset.stats();
        info!(
            participants = stats.participants,
            id_types = stats.id_types,
            parties = stats.parties,
            source = self.config.data_file.as_deref().unwrap_or("<bundled>"),
            "静态数据集已加载"
        );

        let state = Arc::new(
            AppState::from_config(&self.config, dataset).context("初始化服务状态失败")?,
        );
        info!(
            send_mode = %state.send_mode(),
            outbound_endpoint = %self.config.outbound.endpoint,
            timeout_ms = self.config.outbound.timeout_ms,
            "send 配置"
        );

        let app = build_router(state);

        let addr: SocketAddr = self
            .config
            .server_addr()
            .parse()
            .with_context(|| format!("无效的监听地址: {}", self.config.server_addr()))?;
        let listener = TcpListener::bind(addr).await.context("绑定端口失败")?;

        info!("Listening on port {}", self.config.server.port);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("服务器运行失败")?;

        info!("Mock 后端已停止");
        Ok(())
    }

    /// 执行 check-data 命令
    ///
    /// 加载并校验数据集，输出统计信息。
    pub fn run_check_data(&self, data: Option<&str>) -> Result<()> {
        let path = data.or(self.config.data_file.as_deref());
        let dataset = load_dataset(path)?;
        let stats = dataset.stats();

        println!("\n数据集: {}", path.unwrap_or("<bundled>"));
        println!("{}", "-".repeat(40));
        println!("  participants: {}", stats.participants);
        println!("  idTypes:      {}", stats.id_types);
        println!("  parties:      {}", stats.parties);
        println!("{}", "-".repeat(40));

        Ok(())
    }
}

fn load_dataset(path: Option<&str>) -> Result<Dataset> {
    Dataset::load(path.map(Path::new)).context("加载静态数据集失败")
}

/// 等待关闭信号（Ctrl+C 或 SIGTERM）
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "安装 CTRL+C 信号处理器失败");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "安装 SIGTERM 信号处理器失败");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到关闭信号，正在停止服务...");
}

// ============================================================================
// 单元测试
// ============================================================================
