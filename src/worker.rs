//! Failure-logging wrappers for fallible operations.
//!
//! A wrapper takes any zero-argument fallible operation and returns a new
//! operation with the identical contract. Success passes through with zero
//! observable side effects. Failure emits exactly one ERROR record on the
//! [`WORKER_TARGET`] log target (the first line names the failing operation,
//! the remaining lines carry the failure trace), and then the original
//! failure propagates unchanged: same type, same value.
//!
//! The wrappers compose freely with [`RetryExecutor`](crate::RetryExecutor):
//! wrap the executor call and only failures that survive the retry budget are
//! logged; attempts that eventually succeed emit nothing.

use std::error::Error;

/// Log target receiving one record per wrapped failure.
pub const WORKER_TARGET: &str = "headway::worker";

/// Wrap a free-standing operation, logging failures under `name`.
///
/// The qualified name is fixed at wrap time. The emitted record's body is
/// `Error invoking <name>` on its first line, followed by the failure trace.
///
/// # Examples
///
/// ```rust
/// use headway::testing::TestFailure;
/// use headway::worker::log_failures;
///
/// let mut fetch = log_failures("catalog.fetch", || Ok::<_, TestFailure>(42));
/// assert_eq!(fetch().unwrap(), 42);
/// ```
pub fn log_failures<T, E, F>(
    name: impl Into<String>,
    mut operation: F,
) -> impl FnMut() -> Result<T, E>
where
    E: Error,
    F: FnMut() -> Result<T, E>,
{
    let name = name.into();
    move || match operation() {
        Ok(value) => Ok(value),
        Err(error) => {
            tracing::error!(
                target: WORKER_TARGET,
                "Error invoking {}\n{}",
                name,
                failure_trace(&error)
            );
            Err(error)
        }
    }
}

/// Wrap an operation whose qualified name is resolved only when it fails.
///
/// Nothing is cached at wrap time: `name` runs at the moment of failure, so
/// the record reflects the runtime identity of the failing call. The success
/// path never invokes `name`.
pub fn log_failures_with<T, E, F, N>(name: N, mut operation: F) -> impl FnMut() -> Result<T, E>
where
    E: Error,
    F: FnMut() -> Result<T, E>,
    N: Fn() -> String,
{
    move || match operation() {
        Ok(value) => Ok(value),
        Err(error) => {
            tracing::error!(
                target: WORKER_TARGET,
                "Error invoking {}\n{}",
                name(),
                failure_trace(&error)
            );
            Err(error)
        }
    }
}

/// Wrap a method bound to a receiver of type `R`.
///
/// The qualified name is derived from `R`'s module path and the method name
/// at failure time, via [`method_qualified`].
///
/// # Examples
///
/// ```rust
/// use headway::testing::TestFailure;
/// use headway::worker::log_failures_for;
///
/// struct Billing;
///
/// let mut charge =
///     log_failures_for::<Billing, _, _, _>("charge", || Ok::<_, TestFailure>("receipt"));
/// assert_eq!(charge().unwrap(), "receipt");
/// ```
pub fn log_failures_for<R, T, E, F>(
    method: &'static str,
    operation: F,
) -> impl FnMut() -> Result<T, E>
where
    R: ?Sized,
    E: Error,
    F: FnMut() -> Result<T, E>,
{
    log_failures_with(move || method_qualified::<R>(method), operation)
}

/// Dotted `module.method` name for a method of `R`.
///
/// The module is taken from the receiver type's path with `::` separators
/// rewritten as dots; generic parameters are ignored. Receivers without a
/// module path (primitives) yield the bare method name.
///
/// # Examples
///
/// ```rust
/// use headway::worker::method_qualified;
///
/// assert_eq!(method_qualified::<Vec<String>>("push"), "alloc.vec.push");
/// ```
pub fn method_qualified<R: ?Sized>(method: &str) -> String {
    let type_path = std::any::type_name::<R>();
    let base = type_path.split('<').next().unwrap_or(type_path);
    match base.rsplit_once("::") {
        Some((module, _)) => format!("{}.{}", module.replace("::", "."), method),
        None => method.to_string(),
    }
}

fn failure_trace<E: Error>(error: &E) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        trace.push_str("\ncaused by: ");
        trace.push_str(&cause.to_string());
        source = cause.source();
    }
    trace
}
