//! Retry configuration.

use std::collections::HashSet;
use std::hash::Hash;
use std::time::Duration;

use crate::backoff::DelaySequence;

/// Immutable description of a retry policy.
///
/// A configuration names the failure codes worth retrying, bounds the attempt
/// budget, and shapes the delay schedule between attempts. It is pure data:
/// construct it once, share it read-only across as many executors and threads
/// as you like.
///
/// The code type `C` is whatever discriminator the caller's failures expose
/// through [`Coded`](crate::Coded): an enum, a status string, anything
/// hashable.
///
/// # Defaults
///
/// `new` starts from a one-second base delay, no jitter, and a ceiling of
/// `min_delay * 2^max_attempts`, which the doubling schedule cannot reach
/// within the attempt budget, so the ceiling only matters once you lower it.
///
/// # Examples
///
/// ```rust
/// use headway::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::new(["Throttling", "RequestLimitExceeded"], 5)
///     .with_min_delay(Duration::from_millis(250))
///     .with_max_delay(Duration::from_secs(30));
///
/// assert!(config.is_retryable(&"Throttling"));
/// assert!(!config.is_retryable(&"AccessDenied"));
/// assert_eq!(config.max_attempts(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "C: serde::Serialize + Eq + std::hash::Hash",
        deserialize = "C: serde::Deserialize<'de> + Eq + std::hash::Hash"
    ))
)]
pub struct RetryConfig<C: Eq + Hash> {
    retryable: HashSet<C>,
    max_attempts: u32,
    min_delay: Duration,
    max_delay: Option<Duration>,
    jitter: bool,
}

impl<C: Eq + Hash> RetryConfig<C> {
    /// Create a configuration from the retryable codes and an attempt budget.
    ///
    /// `max_attempts` counts every invocation including the first; it must be
    /// at least 1 (see [`validate`](Self::validate)). An empty code set means
    /// every failure propagates on the first attempt.
    pub fn new(retryable: impl IntoIterator<Item = C>, max_attempts: u32) -> Self {
        Self {
            retryable: retryable.into_iter().collect(),
            max_attempts,
            min_delay: Duration::from_secs(1),
            max_delay: None,
            jitter: false,
        }
    }

    /// Set the base delay the schedule starts from.
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    /// Set the ceiling the schedule clamps to.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = Some(max_delay);
        self
    }

    /// Enable or disable jitter.
    ///
    /// With jitter, each delay is a uniform random draw below the
    /// deterministic schedule, de-synchronizing concurrent retriers.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// The configured retryable codes.
    pub fn retryable_codes(&self) -> &HashSet<C> {
        &self.retryable
    }

    /// The attempt budget, counting the first invocation.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The base delay.
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// The delay ceiling: the configured value, or `min_delay * 2^max_attempts`
    /// when none was set.
    pub fn max_delay(&self) -> Duration {
        self.max_delay.unwrap_or_else(|| {
            self.min_delay
                .saturating_mul(2u32.saturating_pow(self.max_attempts))
        })
    }

    /// Whether jitter is enabled.
    pub fn jitter(&self) -> bool {
        self.jitter
    }

    /// Whether a failure with this code should be retried.
    pub fn is_retryable(&self, code: &C) -> bool {
        self.retryable.contains(code)
    }

    /// Produce a fresh delay sequence for one execution.
    ///
    /// Every call restarts from the base delay; sequences share no cursor.
    pub fn delay_sequence(&self) -> DelaySequence {
        DelaySequence::new(self.min_delay, self.max_delay(), self.jitter)
    }

    /// Check the configuration's bounds.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_attempts < 1 {
            return Err("max_attempts must be at least 1");
        }
        if self.min_delay.is_zero() {
            return Err("min_delay must be positive");
        }
        if self.max_delay() < self.min_delay {
            return Err("max_delay must be at least min_delay");
        }
        Ok(())
    }
}
