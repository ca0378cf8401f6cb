//! Failure-logging wrapper behavior, observed through the tracing sink.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use headway::testing::{flaky, TestFailure};
use headway::worker::{log_failures, log_failures_for, log_failures_with};
use headway::{RetryConfig, RetryExecutor};
use tracing_test::traced_test;

#[traced_test]
#[test]
fn success_emits_nothing() {
    let mut op = log_failures("demo.quiet", || Ok::<_, TestFailure>(42));
    assert_eq!(op().ok(), Some(42));
    assert!(!logs_contain("Error invoking"));
}

#[traced_test]
#[test]
fn failure_logs_the_qualified_name_then_the_trace() {
    let mut op = log_failures("demo.rabbit", || {
        Err::<i32, _>(TestFailure::new("Carrots", "more carrots"))
    });
    assert!(op().is_err());

    logs_assert(|lines: &[&str]| {
        let idx = lines
            .iter()
            .position(|line| line.ends_with("Error invoking demo.rabbit"))
            .ok_or_else(|| "missing qualified-name line".to_string())?;
        match lines.get(idx + 1) {
            Some(line) if line.contains("more carrots") => Ok(()),
            other => Err(format!("trace did not follow the name line: {:?}", other)),
        }
    });
}

#[traced_test]
#[test]
fn failure_propagates_unchanged_after_logging() {
    let mut op = log_failures("demo.rabbit", || {
        Err::<i32, _>(TestFailure::new("Carrots", "more carrots"))
    });
    assert_eq!(op().unwrap_err(), TestFailure::new("Carrots", "more carrots"));
}

#[derive(Debug)]
struct UploadError;

#[derive(Debug)]
struct ResetError;

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "snapshot upload failed")
    }
}

impl fmt::Display for ResetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connection reset")
    }
}

impl Error for ResetError {}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&ResetError)
    }
}

#[traced_test]
#[test]
fn the_trace_includes_the_source_chain() {
    let mut op = log_failures("demo.upload", || Err::<(), _>(UploadError));
    assert!(op().is_err());
    assert!(logs_contain("Error invoking demo.upload"));
    assert!(logs_contain("snapshot upload failed"));
    assert!(logs_contain("caused by: connection reset"));
}

struct Billing;

#[traced_test]
#[test]
fn method_wrappers_name_the_receiver_module() {
    let mut op = log_failures_for::<Billing, i32, _, _>("charge", || {
        Err(TestFailure::new("Card", "card declined"))
    });
    assert!(op().is_err());
    assert!(logs_contain("Error invoking worker_integration.charge"));
    assert!(logs_contain("card declined"));
}

#[traced_test]
#[test]
fn deferred_names_are_not_computed_until_failure() {
    let resolved = Arc::new(AtomicU32::new(0));
    let mut op = log_failures_with(
        {
            let resolved = resolved.clone();
            move || {
                resolved.fetch_add(1, Ordering::SeqCst);
                "demo.later".to_string()
            }
        },
        || Ok::<_, TestFailure>(1),
    );
    assert_eq!(op().ok(), Some(1));
    assert_eq!(resolved.load(Ordering::SeqCst), 0);
}

#[traced_test]
#[test]
fn one_record_per_failure() {
    let mut op = log_failures("demo.twice", || {
        Err::<(), _>(TestFailure::new("Busy", "still busy"))
    });
    assert!(op().is_err());
    assert!(op().is_err());

    logs_assert(|lines: &[&str]| {
        let records = lines
            .iter()
            .filter(|line| line.contains("Error invoking demo.twice"))
            .count();
        if records == 2 {
            Ok(())
        } else {
            Err(format!("expected 2 records, saw {}", records))
        }
    });
}

#[traced_test]
#[test]
fn retries_that_eventually_succeed_emit_no_worker_record() {
    let executor = RetryExecutor::new(
        RetryConfig::new(["Busy"], 5)
            .with_min_delay(Duration::from_millis(1))
            .with_max_delay(Duration::from_millis(4)),
    );
    let mut op = log_failures("demo.recovering", {
        let mut inner = flaky(2, "Busy", 9);
        move || executor.execute(&mut inner)
    });
    assert_eq!(op().ok(), Some(9));
    assert!(!logs_contain("Error invoking demo.recovering"));
}
