//! Alias-fallback fetch.
//!
//! Sources name the same instrument inconsistently (`^TNX` vs `US10Y=F`,
//! `u.s.-10-year-bond-yield` vs `us-10-yr-t-note`). This routine walks an
//! ordered list of candidate identifiers, giving each a small fixed number of
//! attempts with a fixed pause between attempts, and returns the first
//! non-empty result together with the identifier that produced it.
//!
//! Empty/malformed responses (`Ok(None)`) and request errors (`Err`) are both
//! ordinary failures: they consume one attempt and the loop moves on. Nothing
//! is cached between calls.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::AppError;

/// Fixed retry budget applied to every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per candidate (values below 1 are treated as 1).
    pub attempts_per_candidate: usize,
    /// Pause between two consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(attempts_per_candidate: usize, delay: Duration) -> Self {
        Self {
            attempts_per_candidate,
            delay,
        }
    }

    /// One attempt per candidate, no pause.
    pub const fn single() -> Self {
        Self::new(1, Duration::ZERO)
    }

    fn attempts(&self) -> usize {
        self.attempts_per_candidate.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_secs(1))
    }
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    /// The candidate that produced `value`.
    pub alias: String,
    /// Total fetch calls made, including the successful one.
    pub attempts: usize,
}

#[derive(Debug, Clone)]
pub enum FallbackOutcome<T> {
    Found(Resolved<T>),
    Exhausted {
        attempts: usize,
        /// Most recent error, if the last failures were errors rather than empties.
        last_error: Option<AppError>,
    },
}

impl<T> FallbackOutcome<T> {
    pub fn found(self) -> Option<Resolved<T>> {
        match self {
            FallbackOutcome::Found(r) => Some(r),
            FallbackOutcome::Exhausted { .. } => None,
        }
    }

    pub fn attempts(&self) -> usize {
        match self {
            FallbackOutcome::Found(r) => r.attempts,
            FallbackOutcome::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Try `candidates` in order and return the first non-empty result.
///
/// `label` is only used for log lines.
pub fn fetch_with_fallback<T, F>(
    label: &str,
    candidates: &[&str],
    policy: RetryPolicy,
    fetch: F,
) -> FallbackOutcome<T>
where
    F: FnMut(&str) -> Result<Option<T>, AppError>,
{
    fetch_with_fallback_using(label, candidates, policy, std::thread::sleep, fetch)
}

/// Same as [`fetch_with_fallback`] with an injectable pause function.
pub fn fetch_with_fallback_using<T, F, S>(
    label: &str,
    candidates: &[&str],
    policy: RetryPolicy,
    mut pause: S,
    mut fetch: F,
) -> FallbackOutcome<T>
where
    F: FnMut(&str) -> Result<Option<T>, AppError>,
    S: FnMut(Duration),
{
    let mut attempts = 0usize;
    let mut last_error = None;

    for (idx, candidate) in candidates.iter().enumerate() {
        if idx == 0 {
            info!(label, candidate, "fetching");
        } else {
            info!(label, candidate, "trying alternative");
        }

        for attempt in 1..=policy.attempts() {
            if attempts > 0 && !policy.delay.is_zero() {
                pause(policy.delay);
            }
            attempts += 1;

            match fetch(candidate) {
                Ok(Some(value)) => {
                    info!(label, candidate, attempts, "fetched");
                    return FallbackOutcome::Found(Resolved {
                        value,
                        alias: candidate.to_string(),
                        attempts,
                    });
                }
                Ok(None) => {
                    warn!(label, candidate, attempt, "no data");
                    last_error = None;
                }
                Err(err) => {
                    warn!(label, candidate, attempt, kind = err.kind().label(), error = %err, "fetch failed");
                    last_error = Some(err);
                }
            }
        }
    }

    warn!(label, attempts, "all candidates exhausted");
    FallbackOutcome::Exhausted { attempts, last_error }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_alias_that_succeeded_and_counts_attempts() {
        let policy = RetryPolicy::new(3, Duration::from_millis(5));
        let mut calls: Vec<String> = Vec::new();
        let mut pauses = 0usize;

        let outcome = fetch_with_fallback_using(
            "US 10Y",
            &["A", "B", "C"],
            policy,
            |_| pauses += 1,
            |candidate| {
                calls.push(candidate.to_string());
                match candidate {
                    "A" => Ok(None),
                    "B" => Err(AppError::network("connection reset")),
                    _ => Ok(Some(4.25)),
                }
            },
        );

        let resolved = outcome.found().expect("C should succeed");
        assert_eq!(resolved.alias, "C");
        assert_eq!(resolved.value, 4.25);
        // 3 for A + 3 for B + 1 for C
        assert_eq!(resolved.attempts, 7);
        assert_eq!(calls.len(), 7);
        assert_eq!(calls.iter().filter(|c| *c == "A").count(), 3);
        // one pause between each pair of consecutive attempts
        assert_eq!(pauses, 6);
    }

    #[test]
    fn primary_success_makes_one_call() {
        let outcome = fetch_with_fallback_using("x", &["A", "B"], RetryPolicy::default(), |_| {}, |_| Ok(Some(1)));
        let resolved = outcome.found().unwrap();
        assert_eq!(resolved.alias, "A");
        assert_eq!(resolved.attempts, 1);
    }

    #[test]
    fn retry_on_same_candidate_can_succeed() {
        let mut n = 0;
        let outcome = fetch_with_fallback_using("x", &["A", "B"], RetryPolicy::new(2, Duration::ZERO), |_| {}, |c| {
            n += 1;
            if c == "A" && n == 2 { Ok(Some("ok")) } else { Ok(None) }
        });
        let resolved = outcome.found().unwrap();
        assert_eq!(resolved.alias, "A");
        assert_eq!(resolved.attempts, 2);
    }

    #[test]
    fn exhaustion_keeps_last_error() {
        let outcome: FallbackOutcome<u8> =
            fetch_with_fallback_using("x", &["A", "B"], RetryPolicy::new(2, Duration::ZERO), |_| {}, |_| {
                Err(AppError::status("HTTP 404"))
            });
        assert_eq!(outcome.attempts(), 4);
        match outcome {
            FallbackOutcome::Exhausted { last_error, .. } => {
                assert_eq!(last_error.map(|e| e.kind()), Some(crate::error::ErrorKind::Status));
            }
            FallbackOutcome::Found(_) => panic!("nothing should be found"),
        }
    }

    #[test]
    fn zero_attempts_is_treated_as_one() {
        let outcome: FallbackOutcome<u8> =
            fetch_with_fallback_using("x", &["A", "B"], RetryPolicy::new(0, Duration::ZERO), |_| {}, |_| Ok(None));
        assert_eq!(outcome.attempts(), 2);
    }

    #[test]
    fn empty_candidate_list_is_exhausted_immediately() {
        let outcome: FallbackOutcome<u8> =
            fetch_with_fallback_using("x", &[], RetryPolicy::default(), |_| {}, |_| Ok(Some(1)));
        assert_eq!(outcome.attempts(), 0);
        assert!(outcome.found().is_none());
    }
}
