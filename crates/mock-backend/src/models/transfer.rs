//! 转账确认模型

use serde::{Deserialize, Serialize};

/// incoming transfer 的确认响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAck {
    /// 十进制字符串
    pub home_transaction_id: String,
}

impl TransferAck {
    pub fn new(home_transaction_id: u64) -> Self {
        Self {
            home_transaction_id: home_transaction_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_id_as_string() {
        let body = serde_json::to_value(TransferAck::new(1_000_000)).unwrap();
        assert_eq!(body, serde_json::json!({ "homeTransactionId": "1000000" }));
    }
}
