//! Fixed-interval retry policy
//!
//! The blocking operations in this crate (wait-until-ready, the initiate
//! poll) are single-threaded sleep-then-retry loops. This module holds the
//! one loop shape they share: a fixed short interval and a limit that is
//! either a wall-clock deadline or until-success, parameterizing the only
//! thing that differs between the two callers.

use std::time::Duration;

use tokio::time::Instant;

/// When a retry loop stops handing out attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryLimit {
    /// Stop once this much wall-clock time has elapsed since the first
    /// attempt. A zero deadline allows exactly one attempt.
    Deadline(Duration),

    /// Never stop; the caller breaks out of the loop on success.
    UntilSuccess,
}

/// Interval plus limit for a sleep-then-retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub limit: RetryLimit,
}

impl RetryPolicy {
    /// A policy bounded by a wall-clock deadline.
    pub fn deadline(total: Duration, interval: Duration) -> Self {
        RetryPolicy { interval, limit: RetryLimit::Deadline(total) }
    }

    /// A policy that retries until the caller is satisfied.
    pub fn until_success(interval: Duration) -> Self {
        RetryPolicy { interval, limit: RetryLimit::UntilSuccess }
    }

    /// Begin a run of attempts under this policy.
    pub fn start(&self) -> Attempt {
        Attempt { policy: *self, started: Instant::now(), first: true }
    }
}

/// One run of attempts under a [`RetryPolicy`].
///
/// The first call to [`next`](Attempt::next) always grants an attempt
/// without sleeping; each later call sleeps for the interval and grants the
/// next one. Under a deadline the elapsed time is checked on both sides of
/// the sleep, so no attempt is ever granted past the deadline.
pub struct Attempt {
    policy: RetryPolicy,
    started: Instant,
    first: bool,
}

impl Attempt {
    /// Wait for the next attempt. Returns false once the limit is reached.
    pub async fn next(&mut self) -> bool {
        if self.first {
            self.first = false;
            return true;
        }
        if let RetryLimit::Deadline(total) = self.policy.limit {
            if self.started.elapsed() >= total {
                return false;
            }
        }
        tokio::time::sleep(self.policy.interval).await;
        match self.policy.limit {
            RetryLimit::Deadline(total) => self.started.elapsed() < total,
            RetryLimit::UntilSuccess => true,
        }
    }
}
