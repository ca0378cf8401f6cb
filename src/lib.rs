//! # Headway
//!
//! Bounded exponential backoff and code-classified retry execution for
//! fallible operations.
//!
//! ## Pieces
//!
//! Three collaborating pieces, each usable on its own:
//!
//! - [`backoff`] produces the delay schedule: doubling from a base delay until
//!   it reaches a ceiling, optionally flattened into uniform random draws to
//!   de-synchronize concurrent retriers.
//! - [`RetryExecutor`] runs a fallible operation under a [`RetryConfig`],
//!   deciding per failure, by membership of the failure's code in a
//!   configured set, whether to sleep and try again or to hand the failure
//!   straight back.
//! - [`worker`] wraps any fallible operation so that a failure is logged with
//!   the operation's qualified name before it propagates, unchanged.
//!
//! ## Quick Example
//!
//! ```rust
//! use headway::testing::flaky;
//! use headway::{RetryConfig, RetryExecutor};
//! use std::time::Duration;
//!
//! let config = RetryConfig::new(["Throttling", "ServiceUnavailable"], 5)
//!     .with_min_delay(Duration::from_millis(1))
//!     .with_max_delay(Duration::from_millis(8));
//!
//! let executor = RetryExecutor::new(config);
//! let value = executor.execute(flaky(2, "Throttling", 42)).unwrap();
//! assert_eq!(value, 42);
//! ```
//!
//! Failures are never wrapped or converted: callers observe exactly the error
//! the operation raised, whether it arrives on the first attempt or the last.
//! Retry attempts and log records are side channels, not part of the return
//! contract.
//!
//! ## Features
//!
//! - `async`: `RetryExecutor::execute_async`, suspending the task via tokio
//!   instead of blocking the thread.
//! - `serde`: `Serialize`/`Deserialize` on [`RetryConfig`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod backoff;
pub mod config;
pub mod error;
pub mod executor;
pub mod testing;
pub mod worker;

// Re-exports
pub use backoff::{delays, jittered_delays, jittered_delays_with, DelaySequence};
pub use config::RetryConfig;
pub use error::Coded;
pub use executor::RetryExecutor;
pub use worker::{log_failures, log_failures_for, log_failures_with};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::backoff::{delays, jittered_delays, jittered_delays_with, DelaySequence};
    pub use crate::config::RetryConfig;
    pub use crate::error::Coded;
    pub use crate::executor::RetryExecutor;
    pub use crate::worker::{log_failures, log_failures_for, log_failures_with};
}
