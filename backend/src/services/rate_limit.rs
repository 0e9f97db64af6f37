use std::collections::HashMap;
use tokio::time::{Duration, Instant};

use crate::constants::RATE_LIMIT_WINDOW_SECONDS;

/// Sliding-window limiter keyed by `(user, action)`. Keys with no attempts
/// left in the window are swept at most once per window.
#[derive(Debug)]
pub struct RateLimiter {
    requests: HashMap<(String, String), Vec<Instant>>,
    max_requests_per_window: u32,
    window: Duration,
    last_sweep: Instant,
}

impl RateLimiter {
    pub fn new(max_requests_per_window: u32) -> Self {
        Self::with_window(max_requests_per_window, Duration::from_secs(RATE_LIMIT_WINDOW_SECONDS))
    }

    pub fn with_window(max_requests_per_window: u32, window: Duration) -> Self {
        Self {
            requests: HashMap::new(),
            max_requests_per_window,
            window,
            last_sweep: Instant::now(),
        }
    }

    pub fn max_requests_per_window(&self) -> u32 {
        self.max_requests_per_window
    }

    /// Number of `(user, action)` buckets currently held.
    pub fn tracked_keys(&self) -> usize {
        self.requests.len()
    }

    fn sweep(&mut self, window_start: Instant) {
        self.requests.retain(|_, requests| {
            requests.retain(|&time| time > window_start);
            !requests.is_empty()
        });
    }

    /// Records an attempt and reports whether it fits in the window.
    /// Refused attempts are not recorded.
    pub fn can_make_request(&mut self, user_id: &str, action: &str) -> bool {
        let now = Instant::now();
        let window_start = now.checked_sub(self.window);

        if now.duration_since(self.last_sweep) >= self.window {
            if let Some(window_start) = window_start {
                self.sweep(window_start);
            }
            self.last_sweep = now;
        }

        let requests = self
            .requests
            .entry((user_id.to_string(), action.to_string()))
            .or_default();

        // Remove old requests
        if let Some(window_start) = window_start {
            requests.retain(|&time| time > window_start);
        }

        if requests.len() < self.max_requests_per_window as usize {
            requests.push(now);
            true
        } else {
            false
        }
    }
}
