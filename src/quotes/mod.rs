// src/quotes/mod.rs
pub mod alpha_vantage;
pub mod synthetic;

use async_trait::async_trait;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "quote_fallbacks_total",
            "Quote fetches that failed and were served synthetic data instead."
        );
    });
}

/// Coarse time-frame selector for the quote charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "1hour")]
    Hour,
    #[default]
    #[serde(rename = "1day")]
    Day,
    #[serde(rename = "1week")]
    Week,
    #[serde(rename = "1month")]
    Month,
}

impl TimeFrame {
    /// Upstream `function` query parameter.
    pub fn api_function(self) -> &'static str {
        match self {
            TimeFrame::Hour => "TIME_SERIES_INTRADAY",
            TimeFrame::Day => "TIME_SERIES_DAILY",
            TimeFrame::Week => "TIME_SERIES_WEEKLY",
            TimeFrame::Month => "TIME_SERIES_MONTHLY",
        }
    }

    /// Key of the nested time-series object in the response body.
    pub fn series_key(self) -> &'static str {
        match self {
            TimeFrame::Hour => "Time Series (60min)",
            TimeFrame::Day => "Time Series (Daily)",
            TimeFrame::Week => "Weekly Time Series",
            TimeFrame::Month => "Monthly Time Series",
        }
    }
}

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBar {
    pub symbol: String,
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A symbol's recent series plus the headline figures the dashboard shows.
/// `bars` is newest first, at most 30 entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSeries {
    pub symbol: String,
    pub bars: Vec<StockBar>,
    pub latest_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    /// True when this series was generated locally instead of fetched.
    pub synthetic: bool,
}

impl StockSeries {
    /// Derives the headline figures from a newest-first bar list.
    pub fn from_bars(symbol: &str, bars: Vec<StockBar>, synthetic: bool) -> Self {
        let latest_price = bars.first().map(|b| b.close).unwrap_or(0.0);
        let previous_close = bars.get(1).map(|b| b.close).unwrap_or(latest_price);
        let change = latest_price - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };
        Self {
            symbol: symbol.to_string(),
            bars,
            latest_price,
            previous_close,
            change,
            change_percent,
            synthetic,
        }
    }
}

#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self, symbol: &str, time_frame: TimeFrame) -> anyhow::Result<StockSeries>;
    fn name(&self) -> &'static str;
}

/// Front door for quote lookups: tries the configured source and falls back
/// to synthetic data on any failure. Quote errors never reach the UI, the
/// original behavior.
pub struct QuoteService {
    source: Box<dyn QuoteSource>,
}

impl QuoteService {
    pub fn new(source: Box<dyn QuoteSource>) -> Self {
        Self { source }
    }

    pub async fn series(&self, symbol: &str, time_frame: TimeFrame) -> StockSeries {
        ensure_metrics_described();
        match self.source.fetch(symbol, time_frame).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(
                    target: "quotes",
                    error = ?e,
                    symbol,
                    source = self.source.name(),
                    "quote fetch failed, serving synthetic data"
                );
                counter!("quote_fallbacks_total").increment(1);
                synthetic::synthetic_series(symbol)
            }
        }
    }
}
