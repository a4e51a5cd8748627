use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tickwatch_core::{cache_key, FreshnessTracker, ManualClock, Settings};

use crate::cli::{CacheArgs, CacheCommand, CacheEntity, CacheExpiryArgs, CacheKeyArgs};
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &CacheArgs, settings: &Settings) -> Result<CommandResult, CliError> {
    match &args.command {
        CacheCommand::Expiry(args) => Ok(expiry(args, settings)),
        CacheCommand::Key(args) => key(args),
    }
}

fn expiry(args: &CacheExpiryArgs, settings: &Settings) -> CommandResult {
    let clock = Arc::new(ManualClock::new(0));
    let tracker = FreshnessTracker::with_clock(settings.cache_ttl(), clock.clone());

    if let Some(age) = args.age_secs {
        tracker.touch(&args.key);
        clock.advance(Duration::from_secs(age));
    }

    let expired = tracker.is_expired(&args.key);
    tracing::debug!(key = %args.key, expired, "expiry evaluated");

    CommandResult::ok(json!({
        "key": args.key,
        "ttl_secs": settings.cache_ttl_secs,
        "age_secs": args.age_secs,
        "expired": expired,
    }))
}

fn key(args: &CacheKeyArgs) -> Result<CommandResult, CliError> {
    let key = match args.entity {
        CacheEntity::TopMovers => String::from(cache_key::TOP_GAINERS_LOSERS),
        CacheEntity::StockDetail => cache_key::stock_detail(identifier(args)?),
        CacheEntity::TimeSeries => cache_key::time_series(identifier(args)?),
        CacheEntity::Search => cache_key::search(identifier(args)?),
    };
    Ok(CommandResult::ok(json!({ "key": key })))
}

fn identifier(args: &CacheKeyArgs) -> Result<&str, CliError> {
    args.identifier
        .as_deref()
        .ok_or_else(|| CliError::Command(String::from("an identifier is required for this entity")))
}
