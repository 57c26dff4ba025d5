//! Creation timestamp sources.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of review creation timestamps in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock that never hands out the same or an earlier value twice.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Cell<i64>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        let next = wall.max(self.last.get().saturating_add(1));
        self.last.set(next);
        next
    }
}

/// Clock returning a caller-controlled value, advanced by one per call.
#[derive(Debug)]
pub struct ManualClock {
    next: Cell<i64>,
}

impl ManualClock {
    pub fn starting_at(epoch_ms: i64) -> Self {
        Self {
            next: Cell::new(epoch_ms),
        }
    }

    /// Sets the value returned by the next `now_ms` call.
    pub fn set(&self, epoch_ms: i64) {
        self.next.set(epoch_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        let value = self.next.get();
        self.next.set(value.saturating_add(1));
        value
    }
}
