use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;
use tickwatch_core::{
    CacheFailure, ErrorClassification, Failure, NetworkFailure, StockFailure, ValidationFailure,
    WatchlistFailure,
};

use crate::cli::{ClassifyArgs, FailureKind};
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ClassifiedFailure {
    kind: String,
    detail: String,
    #[serde(flatten)]
    classification: ErrorClassification,
}

pub fn run(args: &ClassifyArgs) -> Result<CommandResult, CliError> {
    let failure = build_failure(args.kind, &args.values)?;
    let classified = describe(args.kind, &failure);
    classified.classification.report();
    Ok(CommandResult::ok(serde_json::to_value(classified)?))
}

pub fn catalog() -> Result<CommandResult, CliError> {
    let entries = FailureKind::value_variants()
        .iter()
        .map(|kind| build_failure(*kind, &[]).map(|failure| describe(*kind, &failure)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CommandResult::ok(serde_json::to_value(entries)?))
}

fn describe(kind: FailureKind, failure: &Failure) -> ClassifiedFailure {
    let kind = kind
        .to_possible_value()
        .map(|value| value.get_name().to_owned())
        .unwrap_or_default();
    ClassifiedFailure {
        kind,
        detail: failure.to_string(),
        classification: failure.classify(),
    }
}

/// Positional context values; missing ones fall back to a sample value.
struct Context<'a> {
    values: &'a [String],
    next: usize,
}

impl<'a> Context<'a> {
    fn new(values: &'a [String]) -> Self {
        Self { values, next: 0 }
    }

    fn take(&mut self) -> Option<&'a str> {
        let value = self.values.get(self.next).map(String::as_str);
        self.next += 1;
        value
    }

    fn text(&mut self, sample: &str) -> String {
        self.take().unwrap_or(sample).to_owned()
    }

    fn optional(&mut self) -> Option<String> {
        self.take().map(str::to_owned)
    }

    fn number<T: FromStr>(&mut self, field: &str, sample: T) -> Result<T, CliError> {
        match self.take() {
            None => Ok(sample),
            Some(raw) => raw
                .parse()
                .map_err(|_| CliError::Command(format!("{field} must be a number, got '{raw}'"))),
        }
    }
}

fn build_failure(kind: FailureKind, values: &[String]) -> Result<Failure, CliError> {
    let mut ctx = Context::new(values);
    let failure = match kind {
        FailureKind::NetworkError => NetworkFailure::NetworkError.into(),
        FailureKind::ServerError => NetworkFailure::ServerError.into(),
        FailureKind::ApiLimitExceeded => NetworkFailure::ApiLimitExceeded.into(),
        FailureKind::ApiError => NetworkFailure::ApiError {
            code: ctx.number("code", 404)?,
            message: ctx.text("Not Found"),
        }
        .into(),
        FailureKind::NetworkUnknown => NetworkFailure::UnknownError.into(),
        FailureKind::CacheExpired => CacheFailure::Expired.into(),
        FailureKind::CacheKeyNotFound => CacheFailure::KeyNotFound {
            key: ctx.text("top_gainers_losers"),
        }
        .into(),
        FailureKind::CacheFull => CacheFailure::Full.into(),
        FailureKind::CacheCorrupted => CacheFailure::Corrupted {
            key: ctx.text("top_gainers_losers"),
        }
        .into(),
        FailureKind::CacheUnavailable => CacheFailure::Unavailable.into(),
        FailureKind::ValidationEmptyInput => ValidationFailure::EmptyInput {
            field: ctx.text("Watchlist name"),
        }
        .into(),
        FailureKind::ValidationInvalidFormat => ValidationFailure::InvalidFormat {
            field: ctx.text("Stock symbol"),
            expected: ctx.text("1-5 uppercase letters"),
        }
        .into(),
        FailureKind::ValidationOutOfRange => ValidationFailure::OutOfRange {
            field: ctx.text("Watchlist name"),
            min: ctx.number("min", 2)?,
            max: ctx.number("max", 50)?,
            actual: ctx.number("actual", 1)?,
        }
        .into(),
        FailureKind::ValidationInvalidCharacters => ValidationFailure::InvalidCharacters {
            field: ctx.text("Watchlist name"),
            pattern: ctx.text("^[a-zA-Z0-9\\s\\-_]+$"),
        }
        .into(),
        FailureKind::ValidationInvalidSymbol => ValidationFailure::InvalidSymbol {
            symbol: ctx.text("BRK.B"),
        }
        .into(),
        FailureKind::StockInvalidSymbol => StockFailure::InvalidSymbol {
            symbol: ctx.text("BRK.B"),
        }
        .into(),
        FailureKind::StockNotFound => StockFailure::NotFound {
            symbol: ctx.text("AAPL"),
        }
        .into(),
        FailureKind::StockInsufficientData => StockFailure::InsufficientData {
            symbol: ctx.text("AAPL"),
        }
        .into(),
        FailureKind::StockRateLimited => StockFailure::ApiRateLimitExceeded.into(),
        FailureKind::StockNoData => StockFailure::NoDataAvailable.into(),
        FailureKind::StockParsing => StockFailure::DataParsingError {
            raw: ctx.text("{}"),
        }
        .into(),
        FailureKind::WatchlistNotFound => WatchlistFailure::NotFound {
            id: ctx.number("id", 1)?,
        }
        .into(),
        FailureKind::WatchlistInvalidName => WatchlistFailure::InvalidName {
            name: ctx.text("!"),
            reason: ctx.text("contains invalid characters"),
        }
        .into(),
        FailureKind::WatchlistDuplicateName => WatchlistFailure::DuplicateName {
            name: ctx.text("My Watchlist"),
        }
        .into(),
        FailureKind::WatchlistFull => WatchlistFailure::Full {
            max_items: ctx.number("max_items", 50)?,
        }
        .into(),
        FailureKind::WatchlistStockPresent => WatchlistFailure::StockAlreadyPresent {
            symbol: ctx.text("AAPL"),
            list_name: ctx.text("My Watchlist"),
        }
        .into(),
        FailureKind::WatchlistStockMissing => WatchlistFailure::StockNotPresent {
            symbol: ctx.text("AAPL"),
            list_name: ctx.text("My Watchlist"),
        }
        .into(),
        FailureKind::WatchlistMaxLists => WatchlistFailure::MaxListsReached.into(),
        FailureKind::WatchlistEmpty => WatchlistFailure::Empty {
            name: ctx.text("My Watchlist"),
        }
        .into(),
        FailureKind::InvalidArgument => Failure::InvalidArgument(ctx.optional()),
        FailureKind::InvalidState => Failure::InvalidState(ctx.optional()),
        FailureKind::Unknown => Failure::Unknown(ctx.text("unexpected failure")),
    };
    Ok(failure)
}
