use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::Symbol;
use crate::error::{Failure, ValidationFailure, WatchlistFailure};

const NAME_FIELD: &str = "Watchlist name";
const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 50;
const NAME_PATTERN: &str = "^[a-zA-Z0-9\\s\\-_]+$";

pub const DEFAULT_WATCHLIST_NAME: &str = "My Watchlist";

/// Trimmed watchlist name of 2-50 letters, digits, whitespace, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WatchlistName(String);

impl WatchlistName {
    pub fn parse(input: &str) -> Result<Self, ValidationFailure> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationFailure::EmptyInput {
                field: String::from(NAME_FIELD),
            });
        }

        let len = trimmed.chars().count();
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
            return Err(ValidationFailure::OutOfRange {
                field: String::from(NAME_FIELD),
                min: MIN_NAME_LEN,
                max: MAX_NAME_LEN,
                actual: len,
            });
        }

        if !trimmed.chars().all(is_name_char) {
            return Err(ValidationFailure::InvalidCharacters {
                field: String::from(NAME_FIELD),
                pattern: String::from(NAME_PATTERN),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WatchlistName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for WatchlistName {
    type Error = ValidationFailure;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WatchlistName> for String {
    fn from(value: WatchlistName) -> Self {
        value.0
    }
}

/// A named, ordered list of stock symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchlist {
    pub id: i64,
    pub name: WatchlistName,
    pub symbols: Vec<Symbol>,
}

impl Watchlist {
    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.symbols.contains(symbol)
    }
}

/// Upper bounds on watchlists and their contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistLimits {
    pub max_lists: usize,
    pub max_items_per_list: usize,
}

impl Default for WatchlistLimits {
    fn default() -> Self {
        Self {
            max_lists: 10,
            max_items_per_list: 50,
        }
    }
}

/// Which limit [`WatchlistBook::check_limits`] should report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitType {
    MaxWatchlists,
    MaxStocksPerWatchlist(i64),
}

/// Utilization of a single limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitStatus {
    pub at_limit: bool,
    pub current: usize,
    pub max_allowed: usize,
    pub remaining: usize,
}

impl LimitStatus {
    fn new(current: usize, max_allowed: usize) -> Self {
        Self {
            at_limit: current >= max_allowed,
            current,
            max_allowed,
            remaining: max_allowed.saturating_sub(current),
        }
    }

    pub const fn can_add_more(&self) -> bool {
        !self.at_limit
    }
}

/// In-memory collection of watchlists enforcing name and size rules.
#[derive(Debug, Default)]
pub struct WatchlistBook {
    limits: WatchlistLimits,
    lists: BTreeMap<i64, Watchlist>,
    next_id: i64,
}

impl WatchlistBook {
    pub fn new(limits: WatchlistLimits) -> Self {
        Self {
            limits,
            lists: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub const fn limits(&self) -> WatchlistLimits {
        self.limits
    }

    pub fn create(&mut self, name: &str) -> Result<i64, Failure> {
        let name = WatchlistName::parse(name)?;
        if self.lists.len() >= self.limits.max_lists {
            return Err(WatchlistFailure::MaxListsReached.into());
        }
        if self.find_by_name(name.as_str()).is_some() {
            return Err(WatchlistFailure::DuplicateName {
                name: name.into(),
            }
            .into());
        }

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.lists.insert(
            id,
            Watchlist {
                id,
                name,
                symbols: Vec::new(),
            },
        );
        tracing::debug!(id, "watchlist created");
        Ok(id)
    }

    pub fn get(&self, id: i64) -> Result<&Watchlist, Failure> {
        check_id(id)?;
        self.lists
            .get(&id)
            .ok_or_else(|| WatchlistFailure::NotFound { id }.into())
    }

    pub fn delete(&mut self, id: i64) -> Result<Watchlist, Failure> {
        check_id(id)?;
        self.lists
            .remove(&id)
            .ok_or_else(|| WatchlistFailure::NotFound { id }.into())
    }

    /// All watchlists, newest first.
    pub fn list(&self) -> Vec<&Watchlist> {
        self.lists.values().rev().collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Watchlist> {
        let name = name.trim();
        self.lists
            .values()
            .find(|list| list.name.as_str().eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, id: i64, symbol: &Symbol) -> Result<bool, Failure> {
        Ok(self.get(id)?.contains(symbol))
    }

    pub fn add_stock(&mut self, id: i64, symbol: Symbol) -> Result<(), Failure> {
        let max_items = self.limits.max_items_per_list;
        let list = self.get_mut(id)?;
        if list.contains(&symbol) {
            return Err(WatchlistFailure::StockAlreadyPresent {
                symbol: symbol.into(),
                list_name: list.name.to_string(),
            }
            .into());
        }
        if list.symbols.len() >= max_items {
            return Err(WatchlistFailure::Full { max_items }.into());
        }

        list.symbols.push(symbol);
        Ok(())
    }

    pub fn remove_stock(&mut self, id: i64, symbol: &Symbol) -> Result<(), Failure> {
        let list = self.get_mut(id)?;
        let Some(position) = list.symbols.iter().position(|held| held == symbol) else {
            return Err(WatchlistFailure::StockNotPresent {
                symbol: symbol.to_string(),
                list_name: list.name.to_string(),
            }
            .into());
        };

        list.symbols.remove(position);
        Ok(())
    }

    pub fn stocks(&self, id: i64) -> Result<&[Symbol], Failure> {
        Ok(&self.get(id)?.symbols)
    }

    /// Like [`Self::stocks`], but an empty list is a failure.
    pub fn require_stocks(&self, id: i64) -> Result<&[Symbol], Failure> {
        let list = self.get(id)?;
        if list.symbols.is_empty() {
            return Err(WatchlistFailure::Empty {
                name: list.name.to_string(),
            }
            .into());
        }
        Ok(&list.symbols)
    }

    pub fn check_limits(&self, limit: LimitType) -> Result<LimitStatus, Failure> {
        match limit {
            LimitType::MaxWatchlists => {
                Ok(LimitStatus::new(self.lists.len(), self.limits.max_lists))
            }
            LimitType::MaxStocksPerWatchlist(id) => Ok(LimitStatus::new(
                self.get(id)?.symbols.len(),
                self.limits.max_items_per_list,
            )),
        }
    }

    /// Return the default watchlist, creating it when absent.
    pub fn default_watchlist(&mut self, name: &str) -> Result<&Watchlist, Failure> {
        let id = match self.find_by_name(name) {
            Some(list) => list.id,
            None => self.create(name)?,
        };
        self.get(id)
    }

    fn get_mut(&mut self, id: i64) -> Result<&mut Watchlist, Failure> {
        check_id(id)?;
        self.lists
            .get_mut(&id)
            .ok_or_else(|| WatchlistFailure::NotFound { id }.into())
    }
}

// ASCII letters, digits, `-`, `_` and the ASCII whitespace set of `\s`
// (space, tab, newline, vertical tab, form feed, carriage return).
fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch.is_ascii_whitespace() || matches!(ch, '\x0B' | '-' | '_')
}

fn check_id(id: i64) -> Result<(), Failure> {
    if id <= 0 {
        return Err(Failure::invalid_argument("Invalid watchlist ID"));
    }
    Ok(())
}
