//! Ordered fallback chains
//!
//! Both pipelines walk a fixed list of candidates in priority order and stop
//! at the first one that yields a value. [`first_success`] drives async
//! attempts, awaiting each candidate before trying the next, so earlier
//! candidates always win when they succeed. [`first_available`] is the
//! synchronous counterpart used for field-priority selection.

use std::fmt::Display;
use std::future::Future;
use tracing::{debug, warn};

/// The first candidate that succeeded
#[derive(Debug, Clone, PartialEq)]
pub struct Success<T> {
    /// Position of the winning candidate in the list
    pub index: usize,
    /// Value it produced
    pub value: T,
}

/// Every candidate failed
///
/// Failures are kept in attempt order.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub failures: Vec<E>,
}

impl<E> Exhausted<E> {
    /// Number of attempts that were made
    pub fn attempts(&self) -> usize {
        self.failures.len()
    }
}

/// Try `candidates` in order until one succeeds
///
/// Each failure is logged and swallowed. Returns the first success together
/// with its index, or every failure when the list is exhausted. An empty
/// candidate list is exhausted immediately with no attempts.
///
/// # Arguments
///
/// * `chain` - Name of the chain (for logging)
/// * `candidates` - Candidates in priority order
/// * `attempt` - Async operation run against a single candidate
pub async fn first_success<'a, C, T, E, F, Fut>(
    chain: &str,
    candidates: &'a [C],
    mut attempt: F,
) -> Result<Success<T>, Exhausted<E>>
where
    F: FnMut(&'a C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let total = candidates.len();
    let mut failures = Vec::with_capacity(total);

    for (index, candidate) in candidates.iter().enumerate() {
        debug!("Attempt {}/{} for chain: {}", index + 1, total, chain);

        match attempt(candidate).await {
            Ok(value) => {
                if index > 0 {
                    debug!(
                        "Chain '{}' succeeded after {} failed attempts",
                        chain, index
                    );
                }
                return Ok(Success { index, value });
            }
            Err(e) => {
                warn!(
                    "Chain '{}' attempt {}/{} failed: {}",
                    chain,
                    index + 1,
                    total,
                    e
                );
                failures.push(e);
            }
        }
    }

    debug!("Chain '{}' exhausted after {} attempts", chain, total);
    Err(Exhausted { failures })
}

/// Probe `candidates` in order and return the first value produced
pub fn first_available<C, T>(candidates: &[C], probe: impl FnMut(&C) -> Option<T>) -> Option<T> {
    candidates.iter().find_map(probe)
}
