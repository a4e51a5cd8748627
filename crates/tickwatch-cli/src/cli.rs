//! CLI argument definitions for tickwatch.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `page` | Slice a list of items into a page |
//! | `classify` | Classify a single failure |
//! | `errors` | Print the classification of every failure kind |
//! | `validate` | Validate a stock symbol or watchlist name |
//! | `cache` | Inspect cache freshness rules |
//! | `market` | Fetch Alpha Vantage market data |
//! | `config` | Print the effective settings |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--config` | none | JSON settings file |
//!
//! Log verbosity follows the `TICKWATCH_LOG` environment variable
//! (`warn` when unset).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stock watchlist client utilities.
#[derive(Debug, Parser)]
#[command(name = "tickwatch", author, version, about = "Stock watchlist client utilities")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// JSON settings file. Environment overrides still apply.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Slice a list of items into a page.
    ///
    /// # Examples
    ///
    ///   tickwatch page AAPL MSFT IBM --size 2 --index 1
    Page(PageArgs),

    /// Classify a failure into message, category, retryability and severity.
    ///
    /// Context values fill the failure's fields in declaration order.
    ///
    /// # Examples
    ///
    ///   tickwatch classify network-error
    ///   tickwatch classify stock-not-found AAPL
    ///   tickwatch classify validation-out-of-range "Watchlist name" 2 50 1
    Classify(ClassifyArgs),

    /// Print the classification of every failure kind.
    Errors,

    /// Validate user input.
    Validate(ValidateArgs),

    /// Cache freshness commands.
    Cache(CacheArgs),

    /// Fetch market data from Alpha Vantage.
    ///
    /// The API key comes from `TICKWATCH_API_KEY` (or the settings file);
    /// without one the `demo` key is used.
    ///
    /// # Examples
    ///
    ///   tickwatch market movers
    ///   tickwatch market detail IBM
    ///   tickwatch market search tesco
    Market(MarketArgs),

    /// Print the effective settings.
    Config,
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Items to paginate, in order.
    pub items: Vec<String>,

    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Page size. Defaults to the configured page size.
    #[arg(long)]
    pub size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    pub kind: FailureKind,

    /// Context values for the failure's fields.
    pub values: Vec<String>,
}

/// Every failure the classifier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailureKind {
    NetworkError,
    ServerError,
    ApiLimitExceeded,
    ApiError,
    NetworkUnknown,
    CacheExpired,
    CacheKeyNotFound,
    CacheFull,
    CacheCorrupted,
    CacheUnavailable,
    ValidationEmptyInput,
    ValidationInvalidFormat,
    ValidationOutOfRange,
    ValidationInvalidCharacters,
    ValidationInvalidSymbol,
    StockInvalidSymbol,
    StockNotFound,
    StockInsufficientData,
    StockRateLimited,
    StockNoData,
    StockParsing,
    WatchlistNotFound,
    WatchlistInvalidName,
    WatchlistDuplicateName,
    WatchlistFull,
    WatchlistStockPresent,
    WatchlistStockMissing,
    WatchlistMaxLists,
    WatchlistEmpty,
    InvalidArgument,
    InvalidState,
    Unknown,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(subcommand)]
    pub command: ValidateCommand,
}

#[derive(Debug, Subcommand)]
pub enum ValidateCommand {
    /// Validate a stock symbol (1-5 letters).
    Symbol { input: String },

    /// Validate a watchlist name (2-50 letters, digits, spaces, '-' or '_').
    WatchlistName { input: String },
}

#[derive(Debug, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Debug, Subcommand)]
pub enum CacheCommand {
    /// Report whether a key written `--age-secs` ago is expired under the
    /// configured TTL.
    ///
    /// # Examples
    ///
    ///   tickwatch cache expiry stock_detail_AAPL --age-secs 600
    Expiry(CacheExpiryArgs),

    /// Print the cache key for an entity.
    Key(CacheKeyArgs),
}

#[derive(Debug, Args)]
pub struct CacheExpiryArgs {
    pub key: String,

    /// Seconds since the key was last written. Omit for a never-written key.
    #[arg(long)]
    pub age_secs: Option<u64>,
}

#[derive(Debug, Args)]
pub struct CacheKeyArgs {
    pub entity: CacheEntity,

    /// Symbol or search query. Ignored for top movers.
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheEntity {
    TopMovers,
    StockDetail,
    TimeSeries,
    Search,
}

#[derive(Debug, Args)]
pub struct MarketArgs {
    /// Ignore fresh cached data and fetch again.
    #[arg(long, default_value_t = false)]
    pub refresh: bool,

    #[command(subcommand)]
    pub command: MarketCommand,
}

#[derive(Debug, Subcommand)]
pub enum MarketCommand {
    /// Top gainers, top losers and most actively traded tickers.
    Movers,

    /// Company overview priced from the latest daily closes.
    Detail { symbol: String },

    /// Daily time series, newest first.
    Series { symbol: String },

    /// Symbol search by keywords.
    Search { query: String },
}
