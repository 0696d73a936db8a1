//! 报价模型
//!
//! 报价永远零手续费：收款方到账金额等于转账金额，币种相同。
//! 请求字段不做校验，缺失字段在响应中同样缺失。

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 报价请求
///
/// 只取报价需要的字段，其余字段忽略。金额保持原始 JSON 值，
/// 数字和字符串都原样回显。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteRequest {
    pub quote_id: Option<Value>,
    pub transaction_id: Option<Value>,
    pub amount: Option<Value>,
    pub currency: Option<Value>,
}

/// 报价响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_amount_currency: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_receive_amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_receive_amount_currency: Option<Value>,
    /// ISO 8601，毫秒精度，UTC
    pub expiration: String,
}

impl QuoteResponse {
    /// 生成零手续费报价，`now` 作为过期时间
    pub fn zero_fee(request: QuoteRequest, now: DateTime<Utc>) -> Self {
        Self {
            quote_id: request.quote_id,
            transaction_id: request.transaction_id,
            transfer_amount: request.amount.clone(),
            transfer_amount_currency: request.currency.clone(),
            payee_receive_amount: request.amount,
            payee_receive_amount_currency: request.currency,
            expiration: format_expiration(now),
        }
    }
}

/// 格式化为 `2024-01-01T00:00:00.000Z`
pub fn format_expiration(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
