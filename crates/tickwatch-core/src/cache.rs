//! Freshness-aware loading of cached API responses.

use std::future::Future;

use crate::error::Failure;
use crate::freshness::FreshnessTracker;
use crate::outcome::{run_catching, Outcome};

/// Defines how a load interacts with the freshness tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Serve the cached payload while its key is fresh; otherwise fetch and
    /// mark the key as written. (Default)
    #[default]
    Use,
    /// Always fetch, then mark the key as written.
    Refresh,
    /// Always fetch and leave the tracker untouched.
    Bypass,
}

/// Load a value, consulting `tracker` before going to the network.
///
/// With [`CacheMode::Use`], a fresh `key` and a present `cached` payload
/// short-circuit `fetch` entirely. A stale key or a missing payload falls
/// through to `fetch`, whose success touches `key` (unless bypassing).
pub async fn load_with_freshness<T, E, F, Fut>(
    tracker: &FreshnessTracker,
    key: &str,
    mode: CacheMode,
    cached: Option<T>,
    fetch: F,
) -> Outcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Failure>,
{
    if mode == CacheMode::Use && !tracker.is_expired(key) {
        if let Some(value) = cached {
            tracing::debug!(key, "serving fresh cached data");
            return Outcome::Success(value);
        }
    }

    let outcome = run_catching(fetch()).await;
    if outcome.is_success() && mode != CacheMode::Bypass {
        tracker.touch(key);
    }
    outcome
}
