//! Behavior-driven tests for failure classification
//!
//! These tests verify WHAT a user is shown for each failure and whether the
//! client may retry it.

use tickwatch_core::{
    classify, CacheFailure, ErrorCategory, Failure, NetworkFailure, Severity, Settings,
    StockFailure, ValidationFailure, WatchlistFailure,
};

fn one_of_each_family() -> Vec<(Failure, ErrorCategory)> {
    vec![
        (NetworkFailure::UnknownError.into(), ErrorCategory::Network),
        (
            NetworkFailure::ApiError {
                code: 404,
                message: String::from("Not Found"),
            }
            .into(),
            ErrorCategory::Network,
        ),
        (
            CacheFailure::KeyNotFound {
                key: String::from("search_apple"),
            }
            .into(),
            ErrorCategory::Cache,
        ),
        (
            ValidationFailure::EmptyInput {
                field: String::from("Watchlist name"),
            }
            .into(),
            ErrorCategory::Validation,
        ),
        (StockFailure::NoDataAvailable.into(), ErrorCategory::Stock),
        (
            WatchlistFailure::Full { max_items: 50 }.into(),
            ErrorCategory::Watchlist,
        ),
        (Failure::invalid_argument("bad"), ErrorCategory::Unknown),
        (Failure::InvalidState(None), ErrorCategory::Unknown),
        (Failure::unknown("boom"), ErrorCategory::Unknown),
    ]
}

// =============================================================================
// Classification: Categories
// =============================================================================

#[test]
fn when_failure_is_classified_category_matches_its_family() {
    for (failure, expected) in one_of_each_family() {
        assert_eq!(classify(&failure).category, expected, "{failure}");
    }
}

#[test]
fn when_failure_is_unrecognized_user_sees_generic_message() {
    // Given: Something outside the known families
    let failure = Failure::unknown(std::io::Error::other("disk on fire"));

    // When: It is classified
    let classification = failure.classify();

    // Then: The internal detail never leaks to the user
    assert_eq!(classification.category, ErrorCategory::Unknown);
    assert!(!classification.message.contains("disk"));
    assert!(!classification.retryable);
    assert_eq!(classification.severity, Severity::Medium);
}

// =============================================================================
// Classification: Retryability And Severity
// =============================================================================

#[test]
fn when_connection_drops_user_may_retry() {
    let classification = classify(&NetworkFailure::NetworkError.into());

    assert!(classification.retryable);
    assert_eq!(classification.message, "No internet connection");
}

#[test]
fn when_stock_is_missing_retrying_will_not_help() {
    let failure: Failure = StockFailure::NotFound {
        symbol: String::from("ZZZZ"),
    }
    .into();

    let classification = classify(&failure);

    assert!(!classification.retryable);
    assert_eq!(classification.message, "Stock 'ZZZZ' not found");
    assert_eq!(classification.severity, Severity::Medium);
}

#[test]
fn when_rate_limited_or_server_down_severity_is_high() {
    let rate_limited = classify(&StockFailure::ApiRateLimitExceeded.into());
    let server_down = classify(&NetworkFailure::ServerError.into());

    assert_eq!(rate_limited.severity, Severity::High);
    assert!(rate_limited.retryable);
    assert_eq!(server_down.severity, Severity::High);
    assert!(server_down.retryable);
}

#[test]
fn when_input_is_invalid_severity_is_low() {
    let failure: Failure = ValidationFailure::OutOfRange {
        field: String::from("Watchlist name"),
        min: 2,
        max: 50,
        actual: 1,
    }
    .into();

    let classification = classify(&failure);

    assert_eq!(classification.severity, Severity::Low);
    assert_eq!(classification.message, "Watchlist name must be 2-50 characters");
}

#[test]
fn when_only_cache_expiry_is_reported_severity_is_low() {
    assert_eq!(classify(&CacheFailure::Expired.into()).severity, Severity::Low);
    assert_eq!(classify(&CacheFailure::Full.into()).severity, Severity::Medium);
}

// =============================================================================
// Classification: Full Table
// =============================================================================

fn text(value: &str) -> String {
    String::from(value)
}

/// Every failure the client can raise, with exactly what the user is shown.
fn classification_table() -> Vec<(Failure, &'static str, ErrorCategory, bool, Severity)> {
    use ErrorCategory::{Cache, Network, Stock, Unknown, Validation, Watchlist};
    use Severity::{High, Low, Medium};

    vec![
        (NetworkFailure::NetworkError.into(), "No internet connection", Network, true, Medium),
        (
            NetworkFailure::ServerError.into(),
            "Server is temporarily unavailable",
            Network,
            true,
            High,
        ),
        (
            NetworkFailure::ApiLimitExceeded.into(),
            "API limit reached, please try again later",
            Network,
            false,
            Medium,
        ),
        (
            NetworkFailure::ApiError {
                code: 401,
                message: text("Unauthorized"),
            }
            .into(),
            "Service error: Unauthorized",
            Network,
            false,
            Medium,
        ),
        (
            NetworkFailure::UnknownError.into(),
            "An unexpected error occurred",
            Network,
            false,
            Medium,
        ),
        (CacheFailure::Expired.into(), "Data needs to be refreshed", Cache, false, Low),
        (
            CacheFailure::KeyNotFound {
                key: text("top_gainers_losers"),
            }
            .into(),
            "Requested data not found in cache",
            Cache,
            false,
            Medium,
        ),
        (
            CacheFailure::Full.into(),
            "Storage is full, please clear some data",
            Cache,
            false,
            Medium,
        ),
        (
            CacheFailure::Corrupted {
                key: text("search_apple"),
            }
            .into(),
            "Data corruption detected, refreshing...",
            Cache,
            false,
            Medium,
        ),
        (CacheFailure::Unavailable.into(), "Cache service unavailable", Cache, true, Medium),
        (
            ValidationFailure::EmptyInput {
                field: text("Watchlist name"),
            }
            .into(),
            "Watchlist name is required",
            Validation,
            false,
            Low,
        ),
        (
            ValidationFailure::InvalidFormat {
                field: text("Stock symbol"),
                expected: text("1-5 uppercase letters"),
            }
            .into(),
            "Please check the format of Stock symbol",
            Validation,
            false,
            Low,
        ),
        (
            ValidationFailure::OutOfRange {
                field: text("Watchlist name"),
                min: 2,
                max: 50,
                actual: 1,
            }
            .into(),
            "Watchlist name must be 2-50 characters",
            Validation,
            false,
            Low,
        ),
        (
            ValidationFailure::InvalidCharacters {
                field: text("Watchlist name"),
                pattern: text("^[a-zA-Z0-9\\s\\-_]+$"),
            }
            .into(),
            "Watchlist name contains invalid characters",
            Validation,
            false,
            Low,
        ),
        (
            ValidationFailure::InvalidSymbol {
                symbol: text("BRK.B"),
            }
            .into(),
            "Please enter a valid stock symbol",
            Validation,
            false,
            Low,
        ),
        (
            StockFailure::InvalidSymbol {
                symbol: text("BRK.B"),
            }
            .into(),
            "Please enter a valid stock symbol (1-5 letters)",
            Stock,
            false,
            Medium,
        ),
        (
            StockFailure::NotFound {
                symbol: text("ZZZZ"),
            }
            .into(),
            "Stock 'ZZZZ' not found",
            Stock,
            false,
            Medium,
        ),
        (
            StockFailure::InsufficientData {
                symbol: text("IBM"),
            }
            .into(),
            "Not enough data available for 'IBM'",
            Stock,
            false,
            Medium,
        ),
        (
            StockFailure::ApiRateLimitExceeded.into(),
            "Too many requests. Please wait a moment and try again",
            Stock,
            true,
            High,
        ),
        (
            StockFailure::NoDataAvailable.into(),
            "No stock data available right now",
            Stock,
            false,
            Medium,
        ),
        (
            StockFailure::DataParsingError { raw: text("{") }.into(),
            "Unable to process stock data",
            Stock,
            false,
            Medium,
        ),
        (
            WatchlistFailure::NotFound { id: 7 }.into(),
            "Watchlist not found",
            Watchlist,
            false,
            Medium,
        ),
        (
            WatchlistFailure::InvalidName {
                name: text("!"),
                reason: text("contains invalid characters"),
            }
            .into(),
            "Invalid watchlist name: contains invalid characters",
            Watchlist,
            false,
            Medium,
        ),
        (
            WatchlistFailure::DuplicateName {
                name: text("Tech"),
            }
            .into(),
            "A watchlist with this name already exists",
            Watchlist,
            false,
            Medium,
        ),
        (
            WatchlistFailure::Full { max_items: 50 }.into(),
            "Watchlist is full (max 50 stocks)",
            Watchlist,
            false,
            Medium,
        ),
        (
            WatchlistFailure::StockAlreadyPresent {
                symbol: text("AAPL"),
                list_name: text("Tech"),
            }
            .into(),
            "'AAPL' is already in this watchlist",
            Watchlist,
            false,
            Medium,
        ),
        (
            WatchlistFailure::StockNotPresent {
                symbol: text("MSFT"),
                list_name: text("Tech"),
            }
            .into(),
            "'MSFT' is not in this watchlist",
            Watchlist,
            false,
            Medium,
        ),
        (
            WatchlistFailure::MaxListsReached.into(),
            "Maximum number of watchlists reached",
            Watchlist,
            false,
            Medium,
        ),
        (
            WatchlistFailure::Empty { name: text("Tech") }.into(),
            "This watchlist is empty",
            Watchlist,
            false,
            Medium,
        ),
        (
            Failure::InvalidArgument(Some(text("Page index must be positive"))),
            "Page index must be positive",
            Unknown,
            false,
            Medium,
        ),
        (
            Failure::InvalidArgument(None),
            "Invalid input provided",
            Unknown,
            false,
            Medium,
        ),
        (
            Failure::InvalidState(Some(text("Watchlists are still loading"))),
            "Watchlists are still loading",
            Unknown,
            false,
            Medium,
        ),
        (
            Failure::InvalidState(None),
            "Operation cannot be performed right now",
            Unknown,
            false,
            Medium,
        ),
        (
            Failure::Unknown(text("socket closed by peer")),
            "Something went wrong. Please try again.",
            Unknown,
            false,
            Medium,
        ),
    ]
}

#[test]
fn when_any_failure_is_classified_user_sees_its_exact_table_entry() {
    let table = classification_table();
    assert_eq!(table.len(), 34, "29 family variants plus 5 generic cases");

    for (failure, message, category, retryable, severity) in table {
        let classification = classify(&failure);
        assert_eq!(classification.message, message, "{failure:?}");
        assert_eq!(classification.category, category, "{failure:?}");
        assert_eq!(classification.retryable, retryable, "{failure:?}");
        assert_eq!(classification.severity, severity, "{failure:?}");
    }
}

// =============================================================================
// Classification: Wire Format
// =============================================================================

#[test]
fn when_classification_is_serialized_enums_use_screaming_case() {
    let classification = classify(&CacheFailure::Unavailable.into());

    let json = serde_json::to_value(&classification).expect("serializes");

    assert_eq!(json["category"], "CACHE");
    assert_eq!(json["severity"], "MEDIUM");
    assert_eq!(json["retryable"], true);
    assert_eq!(json["message"], "Cache service unavailable");
}

// =============================================================================
// Configuration Errors
// =============================================================================

#[test]
fn when_settings_file_is_malformed_loading_fails() {
    // Given: A settings file that is not JSON
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "not json").expect("write");

    // When: It is loaded
    let result = Settings::from_file(&path);

    // Then: A parse error names the problem
    let error = result.expect_err("malformed file must fail");
    assert!(error.to_string().contains("invalid config file"));
}

#[test]
fn when_settings_file_is_partial_missing_fields_keep_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "page_size": 5 }"#).expect("write");

    let settings = Settings::from_file(&path).expect("loads");

    assert_eq!(settings.page_size, 5);
    assert_eq!(settings.cache_ttl_secs, Settings::default().cache_ttl_secs);
}
