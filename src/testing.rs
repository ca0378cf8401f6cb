//! Test support: coded failures and scripted operations.
//!
//! This module backs the crate's own suite and doctests, and is public so
//! downstream code can exercise its retry wiring without inventing throwaway
//! error types.
//!
//! # Examples
//!
//! ```rust
//! use headway::testing::flaky;
//! use headway::{RetryConfig, RetryExecutor};
//! use std::time::Duration;
//!
//! let executor = RetryExecutor::new(
//!     RetryConfig::new(["Busy"], 3).with_min_delay(Duration::from_millis(1)),
//! );
//!
//! // One transient failure, then success on the second attempt.
//! assert_eq!(executor.execute(flaky(1, "Busy", 7)).unwrap(), 7);
//! ```

use std::error::Error;
use std::fmt;
use std::hash::Hash;

use crate::error::Coded;

/// A displayable failure carrying an explicit code.
///
/// The default code type is `&'static str`, which keeps test setups terse;
/// any hashable code type works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFailure<C = &'static str> {
    code: C,
    message: String,
}

impl<C> TestFailure<C> {
    /// Build a failure with the given code and message.
    pub fn new(code: C, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl<C> fmt::Display for TestFailure<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl<C: fmt::Debug> Error for TestFailure<C> {}

impl<C: Clone + Eq + Hash> Coded for TestFailure<C> {
    type Code = C;

    fn code(&self) -> C {
        self.code.clone()
    }
}

/// Operation that fails `failures` times with `code` before yielding `value`.
///
/// # Examples
///
/// ```rust
/// use headway::testing::flaky;
///
/// let mut op = flaky(1, "Busy", 7);
/// assert!(op().is_err());
/// assert_eq!(op().ok(), Some(7));
/// ```
pub fn flaky<T, C>(failures: u32, code: C, value: T) -> impl FnMut() -> Result<T, TestFailure<C>>
where
    T: Clone,
    C: Clone,
{
    let mut remaining = failures;
    move || {
        if remaining > 0 {
            remaining -= 1;
            Err(TestFailure::new(code.clone(), "transient failure"))
        } else {
            Ok(value.clone())
        }
    }
}

/// Operation that never succeeds.
pub fn always_fail<T, C: Clone>(code: C) -> impl FnMut() -> Result<T, TestFailure<C>> {
    move || Err(TestFailure::new(code.clone(), "operation failed"))
}
