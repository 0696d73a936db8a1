//! Mock Backend
//!
//! SDK scheme adapter 的模拟 DFSP 后端，用于开发和联调环境。
//!
//! # 主要模块
//!
//! - `store`: 静态数据集与 home transaction id 计数器
//! - `services`: parties / quoterequests / transfers / send 路由
//! - `outbound`: `/send` 转发使用的下游 HTTP 客户端
//! - `app`: 路由组装
//!
//! # 使用示例
//!
//! ```rust
//! use std::sync::Arc;
//! use mock_backend::app::build_router;
//! use mock_backend::state::AppState;
//! use mock_backend::store::{Dataset, HomeTransactionCounter};
//!
//! let state = AppState::new(
//!     Arc::new(Dataset::bundled().unwrap()),
//!     Arc::new(HomeTransactionCounter::new()),
//!     None,
//! );
//! let app = build_router(Arc::new(state));
//! ```

pub mod app;
pub mod cli;
pub mod models;
pub mod outbound;
pub mod services;
pub mod state;
pub mod store;

/// 服务名，用于加载 config/{SERVICE_NAME}.toml
pub const SERVICE_NAME: &str = "mock-backend";
