// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 The xdraft developers

//! Bounded retries with exponential backoff.
//!
//! AI providers fail in two broad ways: _transient_ failures, such as rate
//! limits and server errors, that are likely to succeed if tried again a
//! little later, and everything else, which will fail the same way no
//! matter how often it is retried. A [`RetryPolicy`] retries the former and
//! gives up immediately on the latter. Each provider decides which of its
//! errors are transient.

use log::warn;
use std::fmt::Display;
use std::time::Duration;

/// Maximum number of attempts, including the first one.
pub const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry. Each later retry waits twice as long as
/// the one before it.
pub const INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// Retries a fallible operation a bounded number of times.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
}

impl Default for RetryPolicy {
    /// Three attempts, waiting 1 second and then 2 seconds between them.
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, INITIAL_DELAY)
    }
}

impl RetryPolicy {
    /// Creates a policy that makes at most `max_attempts` attempts, waiting
    /// `initial_delay` before the first retry.
    ///
    /// At least one attempt is always made.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        let max_attempts = max_attempts.max(1);
        Self {
            max_attempts,
            initial_delay,
        }
    }

    /// How long to wait after the failed attempt numbered `attempt`
    /// (counting from zero) before trying again.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use xdraft::ai::retry::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
    /// assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
    /// ```
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Runs `call` until it succeeds, fails with an error that
    /// `is_transient` rejects, or runs out of attempts.
    ///
    /// Returns the first success, or the last error. The policy sleeps
    /// between attempts, but never after the last one.
    pub async fn run<T, E, F, Fut, C>(&self, is_transient: C, mut call: F) -> Result<T, E>
    where
        E: Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        C: Fn(&E) -> bool,
    {
        let mut attempt = 0;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt + 1 < self.max_attempts && is_transient(&err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "attempt {} of {} failed ({err}), retrying in {}ms",
                        attempt + 1,
                        self.max_attempts,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
