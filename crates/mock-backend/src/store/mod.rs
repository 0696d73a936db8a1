//! 内存存储
//!
//! - `dataset`: 启动时加载的只读静态数据（participants / parties）
//! - `counter`: 进程内单调递增的 home transaction id 生成器

pub mod counter;
pub mod dataset;

pub use counter::{HomeTransactionCounter, INITIAL_HOME_TRANSACTION_ID};
pub use dataset::{Dataset, DatasetStats};
