//! Exponential backoff delay schedules.
//!
//! A schedule starts at a base delay and doubles at every position until it
//! reaches a ceiling, after which it yields the ceiling forever. Schedules are
//! plain iterators: pure values until pulled, cheap to restart, and bounded
//! only by how many positions the caller consumes.
//!
//! The jittered variant replaces each position with a uniform random draw
//! below the deterministic value, which spreads concurrent retriers out in
//! time instead of letting them hammer a struggling dependency in lockstep.
//!
//! # Quick Start
//!
//! ```rust
//! use headway::backoff::delays;
//! use std::time::Duration;
//!
//! let schedule: Vec<_> = delays(Duration::from_secs(1), Duration::from_secs(8))
//!     .take(5)
//!     .collect();
//!
//! assert_eq!(
//!     schedule,
//!     vec![
//!         Duration::from_secs(1),
//!         Duration::from_secs(2),
//!         Duration::from_secs(4),
//!         Duration::from_secs(8),
//!         Duration::from_secs(8), // clamped from here on
//!     ]
//! );
//! ```

use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;

/// Deterministic doubling schedule.
///
/// Position `i` (0-indexed) yields `min(min_delay * 2^i, max_delay)`. The
/// iterator never ends; once doubling reaches the ceiling every subsequent
/// position yields exactly the ceiling. Doubling saturates rather than
/// overflowing.
#[derive(Debug, Clone)]
pub struct Delays {
    cur: Duration,
    max: Duration,
}

impl Iterator for Delays {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let delay = self.cur.min(self.max);
        self.cur = self.cur.saturating_mul(2);
        Some(delay)
    }
}

/// Jittered schedule over an explicit random source.
///
/// Position `i` draws uniformly from `[0, min(min_delay * 2^i, max_delay))`:
/// never negative, never at or above the deterministic schedule's value at
/// the same position.
#[derive(Debug)]
pub struct JitteredDelays<R> {
    cur: Duration,
    max: Duration,
    rng: R,
}

impl<R: Rng> Iterator for JitteredDelays<R> {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let bound = self.cur.min(self.max);
        self.cur = self.cur.saturating_mul(2);
        Some(bound.mul_f64(self.rng.random::<f64>()))
    }
}

/// Build the deterministic doubling schedule.
///
/// # Examples
///
/// ```rust
/// use headway::backoff::delays;
/// use std::time::Duration;
///
/// let mut schedule = delays(Duration::from_millis(100), Duration::from_millis(250));
///
/// assert_eq!(schedule.next(), Some(Duration::from_millis(100)));
/// assert_eq!(schedule.next(), Some(Duration::from_millis(200)));
/// assert_eq!(schedule.next(), Some(Duration::from_millis(250)));
/// assert_eq!(schedule.next(), Some(Duration::from_millis(250)));
/// ```
pub fn delays(min_delay: Duration, max_delay: Duration) -> Delays {
    Delays {
        cur: min_delay,
        max: max_delay,
    }
}

/// Build a jittered schedule drawing from the thread-local generator.
///
/// Each thread draws an independent, uncorrelated sequence, so concurrent
/// retriers sharing this constructor do not synchronize. For deterministic
/// draws use [`jittered_delays_with`] and a seeded generator.
pub fn jittered_delays(min_delay: Duration, max_delay: Duration) -> JitteredDelays<ThreadRng> {
    jittered_delays_with(min_delay, max_delay, rand::rng())
}

/// Build a jittered schedule over a caller-supplied random source.
///
/// The random source is configuration, not hidden global state: hand in a
/// seeded generator and the schedule becomes fully reproducible.
///
/// # Examples
///
/// ```rust
/// use headway::backoff::jittered_delays_with;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use std::time::Duration;
///
/// let draws: Vec<_> =
///     jittered_delays_with(Duration::from_secs(1), Duration::from_secs(64), StdRng::seed_from_u64(42))
///         .take(4)
///         .collect();
///
/// let again: Vec<_> =
///     jittered_delays_with(Duration::from_secs(1), Duration::from_secs(64), StdRng::seed_from_u64(42))
///         .take(4)
///         .collect();
///
/// assert_eq!(draws, again);
/// ```
pub fn jittered_delays_with<R: Rng>(
    min_delay: Duration,
    max_delay: Duration,
    rng: R,
) -> JitteredDelays<R> {
    JitteredDelays {
        cur: min_delay,
        max: max_delay,
        rng,
    }
}

/// The schedule shape selected by a [`RetryConfig`](crate::RetryConfig).
///
/// Produced by [`RetryConfig::delay_sequence`](crate::RetryConfig::delay_sequence);
/// every call yields a fresh sequence starting from the base delay, with no
/// cursor shared between calls. When jitter is enabled each pull draws from
/// the thread-local generator at that moment, so the sequence stays `Send`.
#[derive(Debug, Clone)]
pub struct DelaySequence {
    bounds: Delays,
    jitter: bool,
}

impl DelaySequence {
    /// Build a sequence over the given bounds, jittered or deterministic.
    pub fn new(min_delay: Duration, max_delay: Duration, jitter: bool) -> Self {
        Self {
            bounds: delays(min_delay, max_delay),
            jitter,
        }
    }
}

impl Iterator for DelaySequence {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let bound = self.bounds.next()?;
        if self.jitter {
            Some(bound.mul_f64(rand::rng().random::<f64>()))
        } else {
            Some(bound)
        }
    }
}
