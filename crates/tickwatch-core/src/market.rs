//! Alpha Vantage market data: top movers, company overview, daily time
//! series and symbol search.
//!
//! Every call goes through [`load_with_freshness`], so a fresh cache key
//! serves the last payload without touching the network. Payloads are kept
//! as raw JSON and normalized into models on each read.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{load_with_freshness, CacheMode};
use crate::domain::Symbol;
use crate::error::{Failure, StockFailure, ValidationFailure};
use crate::freshness::{cache_key, FreshnessTracker};
use crate::http_client::HttpRequest;
use crate::network::NetworkService;
use crate::outcome::Outcome;

pub const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";

/// A single row of the gainers/losers/most-active tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: String,
    pub volume: u64,
}

impl Stock {
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMovers {
    pub last_updated: String,
    pub top_gainers: Vec<Stock>,
    pub top_losers: Vec<Stock>,
    pub most_actively_traded: Vec<Stock>,
}

/// Company overview, priced from the latest two daily closes when available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockDetail {
    pub symbol: String,
    pub name: String,
    pub description: String,
    pub exchange: String,
    pub currency: String,
    pub country: String,
    pub sector: String,
    pub industry: String,
    pub market_cap: String,
    pub pe_ratio: String,
    pub eps: String,
    pub dividend_yield: String,
    pub week_52_high: String,
    pub week_52_low: String,
    pub beta: String,
    pub address: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: String,
    pub volume: u64,
}

impl StockDetail {
    /// Fill price, change and volume from the newest bar and the one before it.
    pub fn with_latest_price(mut self, series: &TimeSeriesData) -> Self {
        let Some(latest) = series.daily_data.first() else {
            return self;
        };

        let (change, change_percent) = match series.daily_data.get(1) {
            Some(previous) if previous.close != 0.0 => {
                let change = latest.close - previous.close;
                (change, format!("{:.2}%", change / previous.close * 100.0))
            }
            Some(previous) => (latest.close - previous.close, String::from("0.00%")),
            None => (0.0, String::from("0.00%")),
        };

        self.current_price = latest.close;
        self.change = change;
        self.change_percent = change_percent;
        self.volume = latest.volume;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBar {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily bars, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesData {
    pub symbol: String,
    pub last_refreshed: String,
    pub time_zone: String,
    pub daily_data: Vec<DailyBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub symbol: String,
    pub name: String,
    pub kind: String,
    pub region: String,
    pub market_open: String,
    pub market_close: String,
    pub timezone: String,
    pub currency: String,
    pub match_score: f64,
}

/// Client for the four Alpha Vantage endpoints the watchlist screens use.
#[derive(Debug)]
pub struct MarketClient {
    network: NetworkService,
    base_url: String,
    api_key: String,
    tracker: Arc<FreshnessTracker>,
    payloads: Mutex<HashMap<String, Value>>,
}

impl MarketClient {
    pub fn new(
        network: NetworkService,
        api_key: impl Into<String>,
        tracker: Arc<FreshnessTracker>,
    ) -> Self {
        Self {
            network,
            base_url: String::from(ALPHA_VANTAGE_URL),
            api_key: api_key.into(),
            tracker,
            payloads: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn tracker(&self) -> &FreshnessTracker {
        &self.tracker
    }

    pub async fn top_movers(&self, mode: CacheMode) -> Outcome<TopMovers> {
        let request = self.request("TOP_GAINERS_LOSERS");
        Outcome::from(
            self.load::<TopMoversDto>(cache_key::TOP_GAINERS_LOSERS, mode, request, None)
                .await
                .and_then(normalize_movers),
        )
    }

    /// Company overview, priced from the daily series when that call succeeds.
    pub async fn stock_detail(&self, symbol: &Symbol, mode: CacheMode) -> Outcome<StockDetail> {
        let request = self.request("OVERVIEW").with_query("symbol", symbol.as_str());
        let key = cache_key::stock_detail(symbol.as_str());
        let detail = match self
            .load::<OverviewDto>(&key, mode, request, Some(symbol))
            .await
            .and_then(|dto| normalize_overview(dto, symbol))
        {
            Ok(detail) => detail,
            Err(failure) => return Outcome::Error(failure),
        };

        match self.time_series(symbol, mode).await {
            Outcome::Success(series) => Outcome::Success(detail.with_latest_price(&series)),
            _ => Outcome::Success(detail),
        }
    }

    pub async fn time_series(&self, symbol: &Symbol, mode: CacheMode) -> Outcome<TimeSeriesData> {
        let request = self
            .request("TIME_SERIES_DAILY")
            .with_query("symbol", symbol.as_str())
            .with_query("outputsize", "compact");
        let key = cache_key::time_series(symbol.as_str());
        Outcome::from(
            self.load::<TimeSeriesDto>(&key, mode, request, Some(symbol))
                .await
                .and_then(|dto| normalize_series(dto, symbol)),
        )
    }

    /// Best matches for `query`, highest match score first.
    pub async fn search(&self, query: &str, mode: CacheMode) -> Outcome<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Outcome::Error(
                ValidationFailure::EmptyInput {
                    field: String::from("Search query"),
                }
                .into(),
            );
        }

        let request = self.request("SYMBOL_SEARCH").with_query("keywords", query);
        let key = cache_key::search(query);
        Outcome::from(
            self.load::<SearchDto>(&key, mode, request, None)
                .await
                .map(normalize_search),
        )
    }

    fn request(&self, function: &str) -> HttpRequest {
        HttpRequest::get(self.base_url.as_str())
            .with_query("function", function)
            .with_query("apikey", self.api_key.as_str())
    }

    async fn load<T: DeserializeOwned>(
        &self,
        key: &str,
        mode: CacheMode,
        request: HttpRequest,
        symbol: Option<&Symbol>,
    ) -> Result<T, Failure> {
        let cached = self.payloads().get(key).cloned();
        let outcome = load_with_freshness(&self.tracker, key, mode, cached, || async {
            let response = self.network.execute(request).await?;
            let payload: Value = serde_json::from_str(&response.body)?;
            check_payload(&payload, symbol)?;
            Ok::<_, Failure>(payload)
        })
        .await;

        let payload = match outcome {
            Outcome::Success(payload) => payload,
            Outcome::Error(failure) => return Err(failure),
            Outcome::Loading => return Err(Failure::invalid_state("market data still loading")),
        };
        if mode != CacheMode::Bypass {
            self.payloads().insert(key.to_owned(), payload.clone());
        }
        Ok(serde_json::from_value(payload)?)
    }

    // Payloads are plain JSON values, so a poisoned lock is still usable.
    fn payloads(&self) -> MutexGuard<'_, HashMap<String, Value>> {
        self.payloads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Alpha Vantage answers 200 for throttling and unknown symbols; the body
/// tells them apart.
fn check_payload(payload: &Value, symbol: Option<&Symbol>) -> Result<(), Failure> {
    if payload.get("Note").is_some() || payload.get("Information").is_some() {
        return Err(StockFailure::ApiRateLimitExceeded.into());
    }
    if payload.get("Error Message").is_some() {
        return Err(match symbol {
            Some(symbol) => StockFailure::NotFound {
                symbol: symbol.to_string(),
            }
            .into(),
            None => StockFailure::NoDataAvailable.into(),
        });
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct StockItemDto {
    ticker: Option<String>,
    price: Option<String>,
    change_amount: Option<String>,
    change_percentage: Option<String>,
    volume: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TopMoversDto {
    last_updated: Option<String>,
    #[serde(default)]
    top_gainers: Vec<StockItemDto>,
    #[serde(default)]
    top_losers: Vec<StockItemDto>,
    #[serde(default)]
    most_actively_traded: Vec<StockItemDto>,
}

#[derive(Debug, Deserialize)]
struct OverviewDto {
    #[serde(rename = "Symbol")]
    symbol: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Exchange")]
    exchange: Option<String>,
    #[serde(rename = "Currency")]
    currency: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
    #[serde(rename = "Sector")]
    sector: Option<String>,
    #[serde(rename = "Industry")]
    industry: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    market_cap: Option<String>,
    #[serde(rename = "PERatio")]
    pe_ratio: Option<String>,
    #[serde(rename = "EPS")]
    eps: Option<String>,
    #[serde(rename = "DividendYield")]
    dividend_yield: Option<String>,
    #[serde(rename = "52WeekHigh")]
    week_52_high: Option<String>,
    #[serde(rename = "52WeekLow")]
    week_52_low: Option<String>,
    #[serde(rename = "Beta")]
    beta: Option<String>,
    #[serde(rename = "Address")]
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetaDataDto {
    #[serde(rename = "2. Symbol")]
    symbol: Option<String>,
    #[serde(rename = "3. Last Refreshed")]
    last_refreshed: Option<String>,
    #[serde(rename = "5. Time Zone")]
    time_zone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBarDto {
    #[serde(rename = "1. open")]
    open: Option<String>,
    #[serde(rename = "2. high")]
    high: Option<String>,
    #[serde(rename = "3. low")]
    low: Option<String>,
    #[serde(rename = "4. close")]
    close: Option<String>,
    #[serde(rename = "5. volume")]
    volume: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesDto {
    #[serde(rename = "Meta Data")]
    meta_data: Option<MetaDataDto>,
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, DailyBarDto>>,
}

#[derive(Debug, Deserialize)]
struct SearchDto {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<SearchMatchDto>,
}

#[derive(Debug, Deserialize)]
struct SearchMatchDto {
    #[serde(rename = "1. symbol")]
    symbol: Option<String>,
    #[serde(rename = "2. name")]
    name: Option<String>,
    #[serde(rename = "3. type")]
    kind: Option<String>,
    #[serde(rename = "4. region")]
    region: Option<String>,
    #[serde(rename = "5. marketOpen")]
    market_open: Option<String>,
    #[serde(rename = "6. marketClose")]
    market_close: Option<String>,
    #[serde(rename = "7. timezone")]
    timezone: Option<String>,
    #[serde(rename = "8. currency")]
    currency: Option<String>,
    #[serde(rename = "9. matchScore")]
    match_score: Option<String>,
}

// The API sends every number as a string; unparsable values read as zero.
fn number(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0.0)
}

fn count(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

fn text(raw: Option<String>) -> String {
    raw.unwrap_or_default()
}

fn normalize_stock(dto: StockItemDto) -> Stock {
    Stock {
        symbol: text(dto.ticker),
        name: String::new(),
        price: number(dto.price.as_deref()),
        change: number(dto.change_amount.as_deref()),
        change_percent: text(dto.change_percentage),
        volume: count(dto.volume.as_deref()),
    }
}

fn normalize_movers(dto: TopMoversDto) -> Result<TopMovers, Failure> {
    let empty = dto.top_gainers.is_empty()
        && dto.top_losers.is_empty()
        && dto.most_actively_traded.is_empty();
    if empty {
        return Err(StockFailure::NoDataAvailable.into());
    }

    Ok(TopMovers {
        last_updated: text(dto.last_updated),
        top_gainers: dto.top_gainers.into_iter().map(normalize_stock).collect(),
        top_losers: dto.top_losers.into_iter().map(normalize_stock).collect(),
        most_actively_traded: dto
            .most_actively_traded
            .into_iter()
            .map(normalize_stock)
            .collect(),
    })
}

fn normalize_overview(dto: OverviewDto, symbol: &Symbol) -> Result<StockDetail, Failure> {
    // An unknown symbol comes back as an empty object.
    let Some(reported) = dto.symbol.filter(|value| !value.is_empty()) else {
        return Err(StockFailure::NotFound {
            symbol: symbol.to_string(),
        }
        .into());
    };

    Ok(StockDetail {
        symbol: reported,
        name: text(dto.name),
        description: text(dto.description),
        exchange: text(dto.exchange),
        currency: text(dto.currency),
        country: text(dto.country),
        sector: text(dto.sector),
        industry: text(dto.industry),
        market_cap: text(dto.market_cap),
        pe_ratio: text(dto.pe_ratio),
        eps: text(dto.eps),
        dividend_yield: text(dto.dividend_yield),
        week_52_high: text(dto.week_52_high),
        week_52_low: text(dto.week_52_low),
        beta: text(dto.beta),
        address: text(dto.address),
        current_price: 0.0,
        change: 0.0,
        change_percent: String::new(),
        volume: 0,
    })
}

fn normalize_series(dto: TimeSeriesDto, symbol: &Symbol) -> Result<TimeSeriesData, Failure> {
    let insufficient = || -> Failure {
        StockFailure::InsufficientData {
            symbol: symbol.to_string(),
        }
        .into()
    };
    let meta = dto.meta_data.ok_or_else(insufficient)?;
    let series = dto
        .time_series
        .filter(|series| !series.is_empty())
        .ok_or_else(insufficient)?;

    // ISO dates sort lexically; newest first.
    let daily_data = series
        .into_iter()
        .rev()
        .map(|(date, bar)| DailyBar {
            date,
            open: number(bar.open.as_deref()),
            high: number(bar.high.as_deref()),
            low: number(bar.low.as_deref()),
            close: number(bar.close.as_deref()),
            volume: count(bar.volume.as_deref()),
        })
        .collect();

    Ok(TimeSeriesData {
        symbol: text(meta.symbol),
        last_refreshed: text(meta.last_refreshed),
        time_zone: text(meta.time_zone),
        daily_data,
    })
}

fn normalize_search(dto: SearchDto) -> Vec<SearchResult> {
    let mut results: Vec<SearchResult> = dto
        .best_matches
        .into_iter()
        .map(|found| SearchResult {
            symbol: text(found.symbol),
            name: text(found.name),
            kind: text(found.kind),
            region: text(found.region),
            market_open: text(found.market_open),
            market_close: text(found.market_close),
            timezone: text(found.timezone),
            currency: text(found.currency),
            match_score: number(found.match_score.as_deref()),
        })
        .collect();
    results.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    results
}
