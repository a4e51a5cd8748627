//! Runtime settings.
//!
//! Defaults match the mobile client; a JSON file and a couple of environment
//! variables can override them.

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{WatchlistLimits, DEFAULT_WATCHLIST_NAME};
use crate::error::ConfigError;
use crate::freshness::DEFAULT_CACHE_TTL;
use crate::pagination::DEFAULT_PAGE_SIZE;

pub const CACHE_TTL_ENV: &str = "TICKWATCH_CACHE_TTL_SECS";
pub const PAGE_SIZE_ENV: &str = "TICKWATCH_PAGE_SIZE";
pub const API_KEY_ENV: &str = "TICKWATCH_API_KEY";

/// Key Alpha Vantage accepts for its sample symbols.
pub const DEMO_API_KEY: &str = "demo";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Freshness window for every cache key, in seconds.
    pub cache_ttl_secs: u64,
    pub page_size: usize,
    pub max_watchlists: usize,
    pub max_watchlist_items: usize,
    pub default_watchlist_name: String,
    /// Never printed back.
    #[serde(skip_serializing)]
    pub api_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            page_size: DEFAULT_PAGE_SIZE,
            max_watchlists: 10,
            max_watchlist_items: 50,
            default_watchlist_name: String::from(DEFAULT_WATCHLIST_NAME),
            api_key: String::from(DEMO_API_KEY),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply `TICKWATCH_CACHE_TTL_SECS`, `TICKWATCH_PAGE_SIZE` and
    /// `TICKWATCH_API_KEY` when set.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides(
        mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(CACHE_TTL_ENV) {
            self.cache_ttl_secs = parse_positive(CACHE_TTL_ENV, &value)?;
        }
        if let Some(value) = lookup(PAGE_SIZE_ENV) {
            self.page_size = parse_positive(PAGE_SIZE_ENV, &value)?;
        }
        if let Some(value) = lookup(API_KEY_ENV).filter(|value| !value.trim().is_empty()) {
            self.api_key = value.trim().to_owned();
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("cache_ttl_secs", self.cache_ttl_secs == 0),
            ("page_size", self.page_size == 0),
            ("max_watchlists", self.max_watchlists == 0),
            ("max_watchlist_items", self.max_watchlist_items == 0),
        ];
        match checks.into_iter().find(|(_, is_zero)| *is_zero) {
            Some((field, _)) => Err(ConfigError::Zero { field }),
            None => Ok(()),
        }
    }

    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub const fn watchlist_limits(&self) -> WatchlistLimits {
        WatchlistLimits {
            max_lists: self.max_watchlists,
            max_items_per_list: self.max_watchlist_items,
        }
    }
}

fn parse_positive<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::InvalidEnv {
            name,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_client_constants() {
        let settings = Settings::default();
        assert_eq!(settings.cache_ttl(), Duration::from_secs(900));
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.watchlist_limits(), WatchlistLimits::default());
        assert_eq!(settings.default_watchlist_name, "My Watchlist");
    }

    #[test]
    fn file_overrides_only_present_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"cache_ttl_secs": 60, "page_size": 5}}"#).expect("write");

        let settings = Settings::from_file(file.path()).expect("valid settings");
        assert_eq!(settings.cache_ttl_secs, 60);
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.max_watchlists, 10);
    }

    #[test]
    fn zero_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"max_watchlists": 0}}"#).expect("write");

        let err = Settings::from_file(file.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::Zero { field: "max_watchlists" }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::from_file(Path::new("/nonexistent/tickwatch.json"))
            .expect_err("must fail");
        assert!(err.to_string().contains("/nonexistent/tickwatch.json"));
    }

    #[test]
    fn overrides_parse_positive_integers() {
        let settings = Settings::default()
            .with_overrides(|name| match name {
                CACHE_TTL_ENV => Some(String::from("120")),
                _ => None,
            })
            .expect("valid override");
        assert_eq!(settings.cache_ttl(), Duration::from_secs(120));

        let err = Settings::default()
            .with_overrides(|name| (name == PAGE_SIZE_ENV).then(|| String::from("0")))
            .expect_err("zero page size");
        assert!(matches!(err, ConfigError::InvalidEnv { name: PAGE_SIZE_ENV, .. }));
    }

    #[test]
    fn api_key_comes_from_env_but_is_never_serialized() {
        let settings = Settings::default()
            .with_overrides(|name| (name == API_KEY_ENV).then(|| String::from(" secret ")))
            .expect("valid override");
        assert_eq!(settings.api_key, "secret");

        let json = serde_json::to_value(&settings).expect("serializes");
        assert!(json.get("api_key").is_none());
    }
}
