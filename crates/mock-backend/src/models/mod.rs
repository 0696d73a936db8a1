//! 请求/响应数据模型

pub mod quote;
pub mod transfer;

pub use quote::{QuoteRequest, QuoteResponse};
pub use transfer::TransferAck;
