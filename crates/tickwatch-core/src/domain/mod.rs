//! # Domain Types
//!
//! Validated stock symbols and watchlists.
//!
//! ## Validation
//!
//! Construction enforces every rule and reports a
//! [`ValidationFailure`](crate::ValidationFailure):
//!
//! ```rust
//! use tickwatch_core::{Symbol, ValidationFailure};
//!
//! let symbol = Symbol::parse(" aapl ").unwrap();
//! assert_eq!(symbol.as_str(), "AAPL");
//!
//! let invalid = Symbol::parse("BRK.B");
//! assert!(matches!(invalid, Err(ValidationFailure::InvalidSymbol { .. })));
//! ```
//!
//! ## Watchlists
//!
//! [`WatchlistBook`] keeps watchlists in memory and reports
//! [`WatchlistFailure`](crate::WatchlistFailure)s for duplicate names, full
//! lists and missing stocks.

mod symbol;
mod watchlist;

pub use symbol::Symbol;
pub use watchlist::{
    LimitStatus, LimitType, Watchlist, WatchlistBook, WatchlistLimits, WatchlistName,
    DEFAULT_WATCHLIST_NAME,
};
