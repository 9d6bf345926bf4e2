//! Fixed-delay retry
//!
//! Both bootstrap loops (agent metadata and task launch) retry a fallible
//! async operation a fixed number of times with a constant pause and no
//! backoff. This module holds that loop, free of any operation-specific
//! logic.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

/// Retry policy: how many attempts to make and how long to pause between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Label used in log output
    pub name: &'static str,

    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Pause between two attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a fixed-delay policy
    pub const fn fixed(name: &'static str, max_attempts: u32, delay: Duration) -> Self {
        Self {
            name,
            max_attempts,
            delay,
        }
    }
}

/// Terminal outcome of a retried operation that never succeeded
#[derive(Debug, Error)]
pub enum RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Every attempt failed
    #[error("gave up after {attempts} attempt(s): {last_error}")]
    Exhausted {
        attempts: u32,
        #[source]
        last_error: E,
    },

    /// The operation failed with an error that must not be retried
    #[error("aborted on attempt {attempt}: {error}")]
    Aborted {
        attempt: u32,
        #[source]
        error: E,
    },
}

impl<E> RetryError<E>
where
    E: std::error::Error + 'static,
{
    /// Number of attempts made before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
            Self::Aborted { attempt, .. } => *attempt,
        }
    }

    /// The last underlying error
    pub fn into_inner(self) -> E {
        match self {
            Self::Exhausted { last_error, .. } => last_error,
            Self::Aborted { error, .. } => error,
        }
    }
}

/// Runs `operation` until it succeeds, is rejected by `should_retry`, or
/// `policy.max_attempts` attempts have been made
///
/// `operation` receives the 1-based attempt number. The loop sleeps
/// `policy.delay` after every retryable failure except the last one.
///
/// # Example
/// ```
/// use ecs_bootstrap_core::retry::{RetryPolicy, retry_with_fixed_delay};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let policy = RetryPolicy::fixed("example", 3, Duration::from_millis(1));
/// let value = retry_with_fixed_delay(
///     policy,
///     |attempt| async move {
///         if attempt < 2 {
///             Err(std::io::Error::other("not yet"))
///         } else {
///             Ok(attempt)
///         }
///     },
///     |_| true,
/// )
/// .await
/// .unwrap();
/// assert_eq!(value, 2);
/// # }
/// ```
pub async fn retry_with_fixed_delay<T, E, F, Fut, R>(
    policy: RetryPolicy,
    mut operation: F,
    mut should_retry: R,
) -> Result<T, RetryError<E>>
where
    E: std::error::Error + 'static,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: FnMut(&E) -> bool,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    info!(
                        "{} succeeded after {} attempt(s)",
                        policy.name, attempt
                    );
                }
                return Ok(value);
            }
            Err(e) => {
                if !should_retry(&e) {
                    error!("{} failed with a non-retryable error: {}", policy.name, e);
                    return Err(RetryError::Aborted { attempt, error: e });
                }

                if attempt >= max_attempts {
                    error!("{} failed after {} attempts: {}", policy.name, attempt, e);
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }

                warn!(
                    "{} failed (attempt {}/{}): {}",
                    policy.name, attempt, max_attempts, e
                );
                warn!("Retrying in {} ms...", policy.delay.as_millis());

                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
