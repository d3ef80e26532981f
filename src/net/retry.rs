//! Opt-in retry and batch helpers built atop the pipeline.
//!
//! DESIGN
//! ======
//! The pipeline itself never retries; callers that want backoff wrap their
//! request in [`retry_with_sleep`] (or [`retry`] in the browser, which plugs
//! in a real timer). Batching settles every request and reports outcomes
//! positionally, never short-circuiting on the first failure.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::time::Duration;

use futures::future::LocalBoxFuture;

use super::error::ApiError;

/// Default number of attempts for [`retry`].
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Re-invoke `operation` until it succeeds or `attempts` are exhausted,
/// sleeping `base_delay × attempt` between attempts (linear backoff).
///
/// `sleep` is injected so native tests can skip real timers.
///
/// # Errors
///
/// Returns the last error once all attempts have failed.
pub async fn retry_with_sleep<T, Op, Fut, Sleep, SleepFut>(
    attempts: u32,
    base_delay: Duration,
    mut operation: Op,
    sleep: Sleep,
) -> Result<T, ApiError>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
    Sleep: Fn(Duration) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let attempts = attempts.max(1);
    let mut last_error = ApiError::Connectivity;
    for attempt in 1..=attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => last_error = error,
        }
        if attempt < attempts {
            sleep(base_delay * attempt).await;
        }
    }
    Err(last_error)
}

/// Browser retry with real delays between attempts.
///
/// # Errors
///
/// Returns the last error once all attempts have failed.
#[cfg(feature = "csr")]
pub async fn retry<T, Op, Fut>(
    attempts: u32,
    base_delay: Duration,
    operation: Op,
) -> Result<T, ApiError>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    retry_with_sleep(attempts, base_delay, operation, gloo_timers::future::sleep).await
}

/// Issue a set of requests concurrently and resolve once all have settled.
///
/// Outcomes are returned in submission order; failures do not cancel the
/// remaining requests.
pub async fn batch<T>(
    requests: Vec<LocalBoxFuture<'_, Result<T, ApiError>>>,
) -> Vec<Result<T, ApiError>> {
    futures::future::join_all(requests).await
}
