//! 下游服务转发
//!
//! `/send` 在 forward 模式下把请求体 POST 到 `{endpoint}/transfers`。

pub mod client;

pub use client::{DownstreamResponse, OutboundClient, build_headers};
