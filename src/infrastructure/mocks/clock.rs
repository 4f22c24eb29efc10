//! Mock clock for testing.

use crate::application::ports::Clock;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock clock for testing.
///
/// Allows tests to control time progression explicitly, enabling
/// deterministic testing of cooldown behavior. Clones share the underlying
/// time value, so advancing one handle is visible through all of them.
/// `set_ms` accepts any value, including one earlier than the current time,
/// to exercise backward clock jumps.
#[derive(Debug, Clone)]
pub struct MockClock {
    current_ms: Arc<Mutex<i64>>,
}

impl MockClock {
    /// Create a mock clock starting at the given epoch millisecond value.
    pub fn new(start_ms: i64) -> Self {
        Self {
            current_ms: Arc::new(Mutex::new(start_ms)),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, duration: Duration) {
        let mut now = self
            .current_ms
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *now = now.saturating_add(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX));
    }

    /// Set the clock to a specific epoch millisecond value.
    pub fn set_ms(&self, now_ms: i64) {
        let mut now = self
            .current_ms
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock");
        *now = now_ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> i64 {
        *self
            .current_ms
            .lock()
            .expect("MockClock mutex poisoned - a test thread panicked while holding the lock")
    }
}
