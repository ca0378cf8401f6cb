//! Retry execution over coded failures.

use std::fmt;
use std::hash::Hash;
use std::thread;

use crate::config::RetryConfig;
use crate::error::Coded;

/// Log target for retry attempt events.
pub const RETRY_TARGET: &str = "headway::retry";

/// Executes fallible operations under a [`RetryConfig`].
///
/// `execute` invokes the operation, classifies any failure by its code, and
/// either sleeps through the next scheduled delay and tries again or hands the
/// failure straight back. The executor never wraps, converts, or swallows a
/// failure: callers observe exactly the error the operation raised, whether it
/// arrives on the first attempt or the last.
///
/// Each call is stateless and independent: nothing carries over between
/// `execute` invocations, so one executor can serve many call sites.
///
/// # Examples
///
/// ```rust
/// use headway::testing::flaky;
/// use headway::{RetryConfig, RetryExecutor};
/// use std::time::Duration;
///
/// let config = RetryConfig::new(["Throttling"], 5)
///     .with_min_delay(Duration::from_millis(1))
///     .with_max_delay(Duration::from_millis(4));
/// let executor = RetryExecutor::new(config);
///
/// // Fails twice with a retryable code, then succeeds on the third attempt.
/// let value = executor.execute(flaky(2, "Throttling", 42)).unwrap();
/// assert_eq!(value, 42);
/// ```
#[derive(Debug, Clone)]
pub struct RetryExecutor<C: Eq + Hash> {
    config: RetryConfig<C>,
}

impl<C: Eq + Hash> RetryExecutor<C> {
    /// Build an executor from a configuration.
    pub fn new(config: RetryConfig<C>) -> Self {
        Self { config }
    }

    /// The configuration this executor runs under.
    pub fn config(&self) -> &RetryConfig<C> {
        &self.config
    }

    /// Run `operation` until it succeeds, fails with a non-retryable code, or
    /// exhausts the attempt budget.
    ///
    /// Success returns immediately with no delay incurred. A failure whose
    /// code is not in the retryable set propagates from the very attempt that
    /// raised it. A retryable failure on the final attempt propagates as-is:
    /// exhaustion surfaces the original error, not a wrapper.
    ///
    /// The delay between attempts blocks the calling thread for the scheduled
    /// duration; it is not cancellable mid-sleep.
    pub fn execute<T, E, F>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Coded<Code = C> + fmt::Display,
    {
        let mut schedule = self.config.delay_sequence();
        let mut attempt = 1u32;
        loop {
            match operation() {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !self.config.is_retryable(&error.code()) {
                        return Err(error);
                    }
                    if attempt >= self.config.max_attempts() {
                        return Err(error);
                    }
                    let delay = schedule.next().unwrap_or_else(|| self.config.max_delay());
                    tracing::debug!(
                        target: RETRY_TARGET,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying after failure"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Like [`execute`](Self::execute), but failures whose code appears in
    /// `ignored` short-circuit to `Ok(None)` instead of propagating.
    ///
    /// The ignore list is consulted before retry classification, so an
    /// ignored code wins even when it is also configured as retryable. A
    /// successful operation yields `Ok(Some(value))`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use headway::testing::always_fail;
    /// use headway::{RetryConfig, RetryExecutor};
    ///
    /// let executor = RetryExecutor::new(RetryConfig::new(["Throttling"], 5));
    ///
    /// // Deleting something that is already gone is not a failure here.
    /// let outcome = executor.execute_ignoring(&["NotFound"], always_fail::<(), _>("NotFound"));
    /// assert_eq!(outcome, Ok(None));
    /// ```
    pub fn execute_ignoring<T, E, F>(&self, ignored: &[C], mut operation: F) -> Result<Option<T>, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Coded<Code = C> + fmt::Display,
    {
        let mut schedule = self.config.delay_sequence();
        let mut attempt = 1u32;
        loop {
            match operation() {
                Ok(value) => return Ok(Some(value)),
                Err(error) => {
                    let code = error.code();
                    if ignored.contains(&code) {
                        return Ok(None);
                    }
                    if !self.config.is_retryable(&code) {
                        return Err(error);
                    }
                    if attempt >= self.config.max_attempts() {
                        return Err(error);
                    }
                    let delay = schedule.next().unwrap_or_else(|| self.config.max_delay());
                    tracing::debug!(
                        target: RETRY_TARGET,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying after failure"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }

    /// Variant of [`execute`](Self::execute) that suspends the task instead
    /// of blocking the thread.
    ///
    /// The decision procedure is identical; only the delay mechanism differs.
    /// Requires the `async` feature.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use headway::testing::TestFailure;
    /// use headway::{RetryConfig, RetryExecutor};
    ///
    /// # tokio_test::block_on(async {
    /// let executor = RetryExecutor::new(RetryConfig::new(["Busy"], 3));
    /// let value = executor
    ///     .execute_async(|| async { Ok::<_, TestFailure>(42) })
    ///     .await
    ///     .unwrap();
    /// assert_eq!(value, 42);
    /// # });
    /// ```
    #[cfg(feature = "async")]
    pub async fn execute_async<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: Coded<Code = C> + fmt::Display,
    {
        let mut schedule = self.config.delay_sequence();
        let mut attempt = 1u32;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    if !self.config.is_retryable(&error.code()) {
                        return Err(error);
                    }
                    if attempt >= self.config.max_attempts() {
                        return Err(error);
                    }
                    let delay = schedule.next().unwrap_or_else(|| self.config.max_delay());
                    tracing::debug!(
                        target: RETRY_TARGET,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "retrying after failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl<C: Eq + Hash> From<RetryConfig<C>> for RetryExecutor<C> {
    fn from(config: RetryConfig<C>) -> Self {
        Self::new(config)
    }
}
