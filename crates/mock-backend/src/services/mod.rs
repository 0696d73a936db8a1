//! Mock 后端服务模块
//!
//! 提供 SDK scheme adapter 调用的 REST API 实现。

pub mod extract;
pub mod health;
pub mod party_service;
pub mod quote_service;
pub mod send_service;
pub mod transfer_service;

pub use extract::LenientJson;
pub use health::{health_check, not_found};
pub use party_service::party_routes;
pub use quote_service::quote_routes;
pub use send_service::send_routes;
pub use transfer_service::transfer_routes;
