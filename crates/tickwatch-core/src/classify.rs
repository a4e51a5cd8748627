//! Maps a [`Failure`] into what the presentation layer needs to render it.
//!
//! Classification is a pure lookup: the same failure always yields the same
//! message, category, retry flag and severity.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{
    CacheFailure, Failure, NetworkFailure, StockFailure, ValidationFailure, WatchlistFailure,
};

const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Top-level failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Stock,
    Watchlist,
    Validation,
    Cache,
    Network,
    Unknown,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "STOCK",
            Self::Watchlist => "WATCHLIST",
            Self::Validation => "VALIDATION",
            Self::Cache => "CACHE",
            Self::Network => "NETWORK",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse priority used for logging and UX emphasis only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

/// User-facing view of a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorClassification {
    pub message: String,
    pub category: ErrorCategory,
    pub retryable: bool,
    pub severity: Severity,
}

impl ErrorClassification {
    /// Emit the classification as a single tracing event whose level follows
    /// the severity.
    pub fn report(&self) {
        match self.severity {
            Severity::Low => tracing::debug!(
                category = %self.category,
                retryable = self.retryable,
                "{}",
                self.message
            ),
            Severity::Medium => tracing::warn!(
                category = %self.category,
                retryable = self.retryable,
                "{}",
                self.message
            ),
            Severity::High => tracing::error!(
                category = %self.category,
                retryable = self.retryable,
                "{}",
                self.message
            ),
        }
    }
}

/// Classify a failure.
pub fn classify(failure: &Failure) -> ErrorClassification {
    ErrorClassification {
        message: failure.user_message(),
        category: failure.category(),
        retryable: failure.is_retryable(),
        severity: failure.severity(),
    }
}

impl Failure {
    pub fn classify(&self) -> ErrorClassification {
        classify(self)
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Stock(_) => ErrorCategory::Stock,
            Self::Watchlist(_) => ErrorCategory::Watchlist,
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Cache(_) => ErrorCategory::Cache,
            Self::Network(_) => ErrorCategory::Network,
            Self::InvalidArgument(_) | Self::InvalidState(_) | Self::Unknown(_) => {
                ErrorCategory::Unknown
            }
        }
    }

    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(NetworkFailure::NetworkError | NetworkFailure::ServerError)
                | Self::Cache(CacheFailure::Unavailable)
                | Self::Stock(StockFailure::ApiRateLimitExceeded)
        )
    }

    pub const fn severity(&self) -> Severity {
        match self {
            Self::Validation(_) | Self::Cache(CacheFailure::Expired) => Severity::Low,
            Self::Stock(StockFailure::ApiRateLimitExceeded)
            | Self::Network(NetworkFailure::ServerError) => Severity::High,
            _ => Severity::Medium,
        }
    }

    /// Short message suitable for display to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Stock(failure) => stock_message(failure),
            Self::Watchlist(failure) => watchlist_message(failure),
            Self::Validation(failure) => validation_message(failure),
            Self::Cache(failure) => String::from(cache_message(failure)),
            Self::Network(failure) => network_message(failure),
            Self::InvalidArgument(message) => message
                .clone()
                .unwrap_or_else(|| String::from("Invalid input provided")),
            Self::InvalidState(message) => message
                .clone()
                .unwrap_or_else(|| String::from("Operation cannot be performed right now")),
            Self::Unknown(_) => String::from(FALLBACK_MESSAGE),
        }
    }
}

fn stock_message(failure: &StockFailure) -> String {
    match failure {
        StockFailure::InvalidSymbol { .. } => {
            String::from("Please enter a valid stock symbol (1-5 letters)")
        }
        StockFailure::NotFound { symbol } => format!("Stock '{symbol}' not found"),
        StockFailure::InsufficientData { symbol } => {
            format!("Not enough data available for '{symbol}'")
        }
        StockFailure::ApiRateLimitExceeded => {
            String::from("Too many requests. Please wait a moment and try again")
        }
        StockFailure::NoDataAvailable => String::from("No stock data available right now"),
        StockFailure::DataParsingError { .. } => String::from("Unable to process stock data"),
    }
}

fn watchlist_message(failure: &WatchlistFailure) -> String {
    match failure {
        WatchlistFailure::NotFound { .. } => String::from("Watchlist not found"),
        WatchlistFailure::InvalidName { reason, .. } => {
            format!("Invalid watchlist name: {reason}")
        }
        WatchlistFailure::DuplicateName { .. } => {
            String::from("A watchlist with this name already exists")
        }
        WatchlistFailure::Full { max_items } => {
            format!("Watchlist is full (max {max_items} stocks)")
        }
        WatchlistFailure::StockAlreadyPresent { symbol, .. } => {
            format!("'{symbol}' is already in this watchlist")
        }
        WatchlistFailure::StockNotPresent { symbol, .. } => {
            format!("'{symbol}' is not in this watchlist")
        }
        WatchlistFailure::MaxListsReached => String::from("Maximum number of watchlists reached"),
        WatchlistFailure::Empty { .. } => String::from("This watchlist is empty"),
    }
}

fn validation_message(failure: &ValidationFailure) -> String {
    match failure {
        ValidationFailure::EmptyInput { field } => format!("{field} is required"),
        ValidationFailure::InvalidFormat { field, .. } => {
            format!("Please check the format of {field}")
        }
        ValidationFailure::OutOfRange {
            field, min, max, ..
        } => format!("{field} must be {min}-{max} characters"),
        ValidationFailure::InvalidCharacters { field, .. } => {
            format!("{field} contains invalid characters")
        }
        ValidationFailure::InvalidSymbol { .. } => {
            String::from("Please enter a valid stock symbol")
        }
    }
}

const fn cache_message(failure: &CacheFailure) -> &'static str {
    match failure {
        CacheFailure::Expired => "Data needs to be refreshed",
        CacheFailure::KeyNotFound { .. } => "Requested data not found in cache",
        CacheFailure::Full => "Storage is full, please clear some data",
        CacheFailure::Corrupted { .. } => "Data corruption detected, refreshing...",
        CacheFailure::Unavailable => "Cache service unavailable",
    }
}

fn network_message(failure: &NetworkFailure) -> String {
    match failure {
        NetworkFailure::NetworkError => String::from("No internet connection"),
        NetworkFailure::ServerError => String::from("Server is temporarily unavailable"),
        NetworkFailure::ApiLimitExceeded => {
            String::from("API limit reached, please try again later")
        }
        NetworkFailure::ApiError { message, .. } => format!("Service error: {message}"),
        NetworkFailure::UnknownError => String::from("An unexpected error occurred"),
    }
}
