use thiserror::Error;

/// Transport and upstream API failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkFailure {
    #[error("network connection error")]
    NetworkError,
    #[error("server error occurred")]
    ServerError,
    #[error("API rate limit exceeded")]
    ApiLimitExceeded,
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },
    #[error("unknown error occurred")]
    UnknownError,
}

/// Local cache failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheFailure {
    #[error("cached data has expired")]
    Expired,
    #[error("cache key not found: {key}")]
    KeyNotFound { key: String },
    #[error("cache storage is full")]
    Full,
    #[error("cached data is corrupted for key: {key}")]
    Corrupted { key: String },
    #[error("cache service is currently unavailable")]
    Unavailable,
}

/// Input validation failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("{field} cannot be empty")]
    EmptyInput { field: String },
    #[error("{field} has invalid format, expected: {expected}")]
    InvalidFormat { field: String, expected: String },
    #[error("{field} must be between {min} and {max} characters, got: {actual}")]
    OutOfRange {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("{field} contains invalid characters, allowed pattern: {pattern}")]
    InvalidCharacters { field: String, pattern: String },
    #[error("invalid stock symbol '{symbol}', must be 1-5 uppercase letters")]
    InvalidSymbol { symbol: String },
}

/// Stock lookup and market-data failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockFailure {
    #[error("invalid stock symbol: {symbol}")]
    InvalidSymbol { symbol: String },
    #[error("stock not found: {symbol}")]
    NotFound { symbol: String },
    #[error("insufficient data available for: {symbol}")]
    InsufficientData { symbol: String },
    #[error("API rate limit exceeded, please try again later")]
    ApiRateLimitExceeded,
    #[error("no stock data available at this time")]
    NoDataAvailable,
    #[error("failed to parse stock data: {raw}")]
    DataParsingError { raw: String },
}

/// Watchlist management failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WatchlistFailure {
    #[error("watchlist not found with id: {id}")]
    NotFound { id: i64 },
    #[error("invalid watchlist name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
    #[error("watchlist with name '{name}' already exists")]
    DuplicateName { name: String },
    #[error("watchlist is full, maximum {max_items} items allowed")]
    Full { max_items: usize },
    #[error("stock {symbol} is already in watchlist '{list_name}'")]
    StockAlreadyPresent { symbol: String, list_name: String },
    #[error("stock {symbol} is not in watchlist '{list_name}'")]
    StockNotPresent { symbol: String, list_name: String },
    #[error("maximum number of watchlists reached")]
    MaxListsReached,
    #[error("watchlist '{name}' is empty")]
    Empty { name: String },
}

/// Every failure an operation can surface to its caller.
///
/// The five domain families are closed. `InvalidArgument` and `InvalidState`
/// cover precondition violations that do not belong to a family, and
/// `Unknown` carries anything else converted at an operation boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Failure {
    #[error(transparent)]
    Network(#[from] NetworkFailure),
    #[error(transparent)]
    Cache(#[from] CacheFailure),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Stock(#[from] StockFailure),
    #[error(transparent)]
    Watchlist(#[from] WatchlistFailure),
    #[error("invalid argument: {}", or_unspecified(.0))]
    InvalidArgument(Option<String>),
    #[error("invalid state: {}", or_unspecified(.0))]
    InvalidState(Option<String>),
    #[error("unexpected failure: {0}")]
    Unknown(String),
}

fn or_unspecified(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("unspecified")
}

impl Failure {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(Some(message.into()))
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(Some(message.into()))
    }

    /// Wrap a foreign error that has no place in the taxonomy.
    pub fn unknown(error: impl std::fmt::Display) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<serde_json::Error> for Failure {
    fn from(error: serde_json::Error) -> Self {
        Self::Stock(StockFailure::DataParsingError {
            raw: error.to_string(),
        })
    }
}

/// Errors raised while loading [`crate::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("environment variable {name} must be a positive integer, got '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("setting '{field}' must be greater than zero")]
    Zero { field: &'static str },
}
