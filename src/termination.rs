//! Cooperative stop conditions shared by every runner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// An external cancel flag plus an optional wall-clock deadline.
///
/// Runners poll [`should_stop`](Self::should_stop) at the top of their
/// outer loop and return the best solution seen so far when it fires.
#[derive(Debug, Clone, Default)]
pub struct Termination {
    cancel: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl Termination {
    /// Never stops early.
    pub fn none() -> Self {
        Self::default()
    }

    /// Stops once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Stops `limit` after now, or at an earlier deadline already set.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        let deadline = Instant::now() + limit;
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    /// Same as [`with_time_limit`](Self::with_time_limit), in milliseconds; `None` is a no-op.
    pub fn with_time_limit_ms(self, ms: Option<u64>) -> Self {
        match ms {
            Some(ms) => self.with_time_limit(Duration::from_millis(ms)),
            None => self,
        }
    }

    /// `true` once cancelled or past the deadline.
    pub fn should_stop(&self) -> bool {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
