//! Three-state outcome container returned by asynchronous operations.

use std::future::Future;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::error::Failure;

/// Result of an operation as seen by a state holder.
///
/// `Loading` is a placeholder for holders that expose a single outcome field
/// over time. It is never a failure and carries nothing actionable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Error(Failure),
    Loading,
}

impl<T> Outcome<T> {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Error(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Error(failure) => Outcome::Error(failure),
            Self::Loading => Outcome::Loading,
        }
    }

    /// Convert into a `Result`, or `None` while still loading.
    pub fn into_result(self) -> Option<Result<T, Failure>> {
        match self {
            Self::Success(value) => Some(Ok(value)),
            Self::Error(failure) => Some(Err(failure)),
            Self::Loading => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<Failure>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Error(error.into()),
        }
    }
}

/// The wrapped unit of work was cancelled before producing a result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("operation was cancelled")]
pub struct Cancelled;

/// Await a unit of work and wrap what it produces.
///
/// Only error types convertible into [`Failure`] are accepted. Dropping the
/// returned future drops `work` with it.
pub async fn run_catching<T, E, F>(work: F) -> Outcome<T>
where
    F: Future<Output = Result<T, E>>,
    E: Into<Failure>,
{
    let outcome = Outcome::from(work.await);
    if let Outcome::Error(failure) = &outcome {
        tracing::debug!(error = %failure, "operation failed");
    }
    outcome
}

/// Await a spawned task and wrap what it produces.
///
/// Cancellation of the task is reported as [`Cancelled`] rather than as a
/// failure, and a panic inside the task is resumed on the caller. Dropping the
/// returned future aborts the task.
pub async fn run_joined<T, E>(handle: JoinHandle<Result<T, E>>) -> Result<Outcome<T>, Cancelled>
where
    E: Into<Failure>,
{
    let mut guard = AbortOnDrop(handle);
    match (&mut guard.0).await {
        Ok(result) => Ok(Outcome::from(result)),
        Err(error) if error.is_cancelled() => Err(Cancelled),
        Err(error) => std::panic::resume_unwind(error.into_panic()),
    }
}

// Aborting a task that already finished is a no-op.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::{NetworkFailure, StockFailure};

    #[tokio::test]
    async fn run_catching_wraps_success() {
        let outcome = run_catching(async { Ok::<_, Failure>(42) }).await;
        assert_eq!(outcome, Outcome::Success(42));
    }

    #[tokio::test]
    async fn run_catching_converts_family_errors() {
        let outcome: Outcome<u32> = run_catching(async { Err(NetworkFailure::NetworkError) }).await;
        assert_eq!(
            outcome,
            Outcome::Error(Failure::Network(NetworkFailure::NetworkError))
        );
    }

    #[tokio::test]
    async fn aborted_task_reports_cancellation() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, Failure>(1)
        });
        handle.abort();

        assert_eq!(run_joined(handle).await, Err(Cancelled));
    }

    #[tokio::test]
    async fn joined_task_failure_is_wrapped() {
        let handle = tokio::spawn(async { Err::<u8, _>(StockFailure::NoDataAvailable) });

        let outcome = run_joined(handle).await.expect("not cancelled");
        assert!(outcome.is_error());
    }

    #[test]
    fn loading_is_neither_success_nor_failure() {
        let outcome: Outcome<()> = Outcome::Loading;
        assert!(outcome.is_loading());
        assert!(outcome.failure().is_none());
        assert!(outcome.into_result().is_none());
    }

    #[test]
    fn map_preserves_failure() {
        let outcome: Outcome<u8> = Outcome::Error(Failure::unknown("x"));
        assert!(outcome.map(|value| value * 2).is_error());
        assert_eq!(Outcome::Success(2).map(|value| value * 2), Outcome::Success(4));
    }
}
