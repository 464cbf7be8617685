//! 取消與期限控制

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{MrpError, Result};

/// 計算上下文
///
/// 可複製並跨執行緒共享；任一複本呼叫 [`PlanningContext::cancel`] 後，
/// 所有複本的 [`PlanningContext::check`] 皆返回 `Cancelled`。
#[derive(Debug, Clone, Default)]
pub struct PlanningContext {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl PlanningContext {
    /// 無期限的上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 從現在起 `timeout` 後到期
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// 可選期限
    pub fn with_optional_timeout(timeout: Option<Duration>) -> Self {
        match timeout {
            Some(timeout) => Self::with_timeout(timeout),
            None => Self::new(),
        }
    }

    /// 取消計算
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// 檢查是否應中止
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(MrpError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(MrpError::DeadlineExceeded);
            }
        }
        Ok(())
    }
}
