//! Polling with a timeout, for pages that render their question late.

use std::thread;
use std::time::{Duration, Instant};

/// How long to keep polling and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub interval: Duration,
}

impl WaitOptions {
    pub fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self { timeout: Duration::from_millis(5000), interval: Duration::from_millis(50) }
    }
}

/// Call `probe` until it yields a value or `options.timeout` elapses.
///
/// The probe always runs at least once, even with a zero timeout. Returns `None` on
/// timeout.
pub fn wait_for<T>(options: &WaitOptions, mut probe: impl FnMut() -> Option<T>) -> Option<T> {
    let deadline = Instant::now() + options.timeout;
    loop {
        if let Some(found) = probe() {
            return Some(found);
        }
        let now = Instant::now();
        if now >= deadline {
            tracing::debug!("Gave up waiting after {:?}", options.timeout);
            return None;
        }
        thread::sleep(options.interval.min(deadline - now));
    }
}
