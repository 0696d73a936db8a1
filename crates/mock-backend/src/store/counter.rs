//! Home transaction id 生成器
//!
//! 每个 incoming transfer 领取一个 id。值从 1_000_000 开始，进程内唯一且严格递增，
//! 重启后归零重来，不做持久化。

use std::sync::atomic::{AtomicU64, Ordering};

/// 进程启动时的初始值
pub const INITIAL_HOME_TRANSACTION_ID: u64 = 1_000_000;

/// 单调递增计数器
///
/// 使用原子 fetch-add 实现，多线程并发领取时不会得到重复值。
#[derive(Debug)]
pub struct HomeTransactionCounter {
    next: AtomicU64,
}

impl Default for HomeTransactionCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeTransactionCounter {
    pub fn new() -> Self {
        Self::starting_at(INITIAL_HOME_TRANSACTION_ID)
    }

    /// 从指定值开始计数（测试用）
    pub fn starting_at(value: u64) -> Self {
        Self {
            next: AtomicU64::new(value),
        }
    }

    /// 返回当前值并加一
    pub fn next_id(&self) -> u64 {
        // 读改写本身是原子的，唯一性不依赖内存序
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// 下一个将被发放的值
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// 重置到初始值
    pub fn reset(&self) {
        self.next.store(INITIAL_HOME_TRANSACTION_ID, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_sequential_ids() {
        let counter = HomeTransactionCounter::new();
        assert_eq!(counter.next_id(), 1_000_000);
        assert_eq!(counter.next_id(), 1_000_001);
        assert_eq!(counter.next_id(), 1_000_002);
        assert_eq!(counter.peek(), 1_000_003);
    }

    #[test]
    fn test_reset_and_seed() {
        let counter = HomeTransactionCounter::starting_at(42);
        assert_eq!(counter.next_id(), 42);
        counter.reset();
        assert_eq!(counter.next_id(), INITIAL_HOME_TRANSACTION_ID);
    }

    #[test]
    fn test_concurrent_ids_are_unique() {
        let counter = Arc::new(HomeTransactionCounter::new());
        let threads = 8;
        let per_thread = 500;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || (0..per_thread).map(|_| counter.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "重复的 id: {id}");
            }
        }

        assert_eq!(seen.len(), threads * per_thread);
        assert_eq!(counter.peek(), INITIAL_HOME_TRANSACTION_ID + (threads * per_thread) as u64);
    }
}
