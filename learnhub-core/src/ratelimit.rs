//! Sliding-window rate limiting for outbound backend requests.

use std::time::{Duration, Instant};

/// Maximum permitted requests per window
pub const REQUEST_QUOTA: u32 = 10;

/// Length of the rate window
pub const WINDOW: Duration = Duration::from_secs(60);

/// Outcome of a permit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permit {
    Allowed,
    /// Denied; the caller should wait this many seconds before retrying
    Denied { wait_secs: u64 },
}

impl Permit {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Permit::Allowed)
    }
}

/// Rolling one-minute request budget.
///
/// This is advisory local throttling only: the backend enforces its own
/// quota and may still reject a request, which surfaces as
/// [`crate::error::HubError::BackendUnavailable`] rather than being retried.
#[derive(Debug)]
pub struct RateLimiter {
    window_start: Instant,
    count: u32,
    quota: u32,
}

impl RateLimiter {
    /// Create a limiter with the default quota.
    pub fn new() -> Self {
        Self::with_quota(REQUEST_QUOTA)
    }

    /// Create a limiter with a custom quota.
    pub fn with_quota(quota: u32) -> Self {
        Self {
            window_start: Instant::now(),
            count: 0,
            quota,
        }
    }

    /// Check whether another request may go out now, counting it if so.
    pub fn permit(&mut self) -> Permit {
        self.permit_at(Instant::now())
    }

    /// Permit check against an explicit clock reading.
    pub fn permit_at(&mut self, now: Instant) -> Permit {
        let elapsed = now.saturating_duration_since(self.window_start);

        if elapsed > WINDOW {
            self.window_start = now;
            self.count = 0;
        }

        if self.count >= self.quota {
            let wait = WINDOW.saturating_sub(elapsed);
            return Permit::Denied {
                wait_secs: wait.as_secs(),
            };
        }

        self.count += 1;
        Permit::Allowed
    }

    /// Requests counted in the current window.
    pub fn used(&self) -> u32 {
        self.count
    }

    /// Configured per-window quota.
    pub fn quota(&self) -> u32 {
        self.quota
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
