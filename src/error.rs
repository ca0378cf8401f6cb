//! The classification seam between failures and retry decisions.

use std::hash::Hash;

/// Failure types that carry a discriminating code.
///
/// The executor never inspects a failure beyond this code: retry eligibility
/// is decided purely by membership of the code in the configured set. Mapping
/// transport-specific failures (HTTP statuses, service error strings, driver
/// errors) onto a code type is the integration layer's job; this crate only
/// asks that codes be hashable and comparable. Codes are returned by value,
/// so keep them cheap, typically a `Copy` enum or a borrowed string.
///
/// # Examples
///
/// ```rust
/// use headway::Coded;
///
/// #[derive(Debug)]
/// enum StoreError {
///     Throttled { retry_after_hint: Option<u64> },
///     Missing(String),
/// }
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum StoreCode {
///     Throttled,
///     Missing,
/// }
///
/// impl Coded for StoreError {
///     type Code = StoreCode;
///
///     fn code(&self) -> StoreCode {
///         match self {
///             StoreError::Throttled { .. } => StoreCode::Throttled,
///             StoreError::Missing(_) => StoreCode::Missing,
///         }
///     }
/// }
///
/// let failure = StoreError::Missing("users/42".into());
/// assert_eq!(failure.code(), StoreCode::Missing);
/// ```
pub trait Coded {
    /// Discriminator compared against the configured retryable set.
    type Code: Eq + Hash;

    /// The code carried by this particular failure.
    fn code(&self) -> Self::Code;
}
