//! # Tickwatch Core
//!
//! Shared plumbing for the tickwatch stock-watchlist client.
//!
//! ## Overview
//!
//! - **Outcome container** returned by every asynchronous operation
//! - **Failure taxonomy** with a deterministic classifier (message, category,
//!   retryability, severity)
//! - **Cache freshness tracker** deciding when cached data must be refetched
//! - **Pagination slicer** for in-memory lists
//! - **Domain validation** for symbols and watchlists
//! - **Market data client** for top movers, company overviews, daily series
//!   and symbol search
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Freshness-aware loading |
//! | [`classify`] | Failure classification |
//! | [`clock`] | Wall and manual clocks |
//! | [`config`] | Runtime settings |
//! | [`domain`] | Symbols and watchlists |
//! | [`error`] | Failure taxonomy |
//! | [`freshness`] | Cache freshness tracker |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`market`] | Alpha Vantage market data client |
//! | [`network`] | Transport result mapping |
//! | [`outcome`] | Outcome container and run-and-wrap helpers |
//! | [`pagination`] | Page slicing |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Caller / UI    │────▶│ Freshness Tracker│
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ run_catching    │────▶│ Network Service  │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Outcome<T>      │────▶│ Classifier       │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`Failure`]; the classifier turns it into what the
//! presentation layer renders:
//!
//! ```rust
//! use tickwatch_core::{ErrorCategory, Failure, NetworkFailure};
//!
//! let classification = Failure::from(NetworkFailure::NetworkError).classify();
//! assert_eq!(classification.category, ErrorCategory::Network);
//! assert!(classification.retryable);
//! assert_eq!(classification.message, "No internet connection");
//! ```

pub mod cache;
pub mod classify;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod freshness;
pub mod http_client;
pub mod market;
pub mod network;
pub mod outcome;
pub mod pagination;

pub use cache::{load_with_freshness, CacheMode};

pub use classify::{classify, ErrorCategory, ErrorClassification, Severity};

pub use clock::{Clock, ManualClock, SystemClock};

pub use config::Settings;

pub use domain::{
    LimitStatus, LimitType, Symbol, Watchlist, WatchlistBook, WatchlistLimits, WatchlistName,
    DEFAULT_WATCHLIST_NAME,
};

pub use error::{
    CacheFailure, ConfigError, Failure, NetworkFailure, StockFailure, ValidationFailure,
    WatchlistFailure,
};

pub use freshness::{cache_key, CacheAction, CacheStatus, FreshnessTracker, DEFAULT_CACHE_TTL};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use market::{
    DailyBar, MarketClient, SearchResult, Stock, StockDetail, TimeSeriesData, TopMovers,
    ALPHA_VANTAGE_URL,
};

pub use network::{map_response, NetworkService};

pub use outcome::{run_catching, run_joined, Cancelled, Outcome};

pub use pagination::{paginate, Page, PageRequest, DEFAULT_PAGE_SIZE};
