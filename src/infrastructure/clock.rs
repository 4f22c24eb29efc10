//! Clock adapters for time operations.
//!
//! Provides the `SystemClock` implementation for production use. See
//! `MockClock` (in `crate::infrastructure::mocks`) for a controllable test
//! clock.

use crate::application::ports::Clock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock implementation reporting epoch milliseconds.
///
/// The guard's cooldown math tolerates wall-clock behavior; backward jumps
/// are observed, not corrected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX),
            // Clock set before the epoch; treat as the epoch itself.
            Err(_) => 0,
        }
    }
}
