//! 路由共享状态

use std::sync::Arc;

use backend_shared::config::{AppConfig, SendMode};
use backend_shared::error::Result;

use crate::outbound::OutboundClient;
use crate::store::{Dataset, HomeTransactionCounter};

/// 所有路由处理器共享的状态
///
/// 数据集只读，计数器通过原子操作递增，`outbound` 为空表示 `/send` 不转发。
#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub counter: Arc<HomeTransactionCounter>,
    pub outbound: Option<OutboundClient>,
}

impl AppState {
    pub fn new(
        dataset: Arc<Dataset>,
        counter: Arc<HomeTransactionCounter>,
        outbound: Option<OutboundClient>,
    ) -> Self {
        Self {
            dataset,
            counter,
            outbound,
        }
    }

    /// 按配置组装状态
    pub fn from_config(config: &AppConfig, dataset: Dataset) -> Result<Self> {
        let outbound = match config.outbound.send_mode {
            SendMode::Forward => Some(OutboundClient::new(&config.outbound)?),
            SendMode::Noop => None,
        };

        Ok(Self::new(
            Arc::new(dataset),
            Arc::new(HomeTransactionCounter::new()),
            outbound,
        ))
    }

    pub fn send_mode(&self) -> SendMode {
        if self.outbound.is_some() {
            SendMode::Forward
        } else {
            SendMode::Noop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::INITIAL_HOME_TRANSACTION_ID;

    #[test]
    fn test_from_config_send_modes() {
        let mut config = AppConfig::default();
        let state = AppState::from_config(&config, Dataset::default()).unwrap();
        assert_eq!(state.send_mode(), SendMode::Forward);
        assert_eq!(
            state.outbound.as_ref().map(OutboundClient::transfers_url),
            Some("http://scheme-adapter:4001/transfers".to_string())
        );
        assert_eq!(state.counter.peek(), INITIAL_HOME_TRANSACTION_ID);

        config.outbound.send_mode = SendMode::Noop;
        let state = AppState::from_config(&config, Dataset::default()).unwrap();
        assert_eq!(state.send_mode(), SendMode::Noop);
        assert!(state.outbound.is_none());
    }
}
