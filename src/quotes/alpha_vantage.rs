// src/quotes/alpha_vantage.rs
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::quotes::{synthetic, QuoteSource, StockBar, StockSeries, TimeFrame};

const MAX_BARS: usize = 30;

/// Alpha Vantage time-series client. One GET per lookup, values arrive as
/// strings inside a date-keyed object (`"1. open"` and friends).
pub struct AlphaVantageSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageSource {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageSource {
    async fn fetch(&self, symbol: &str, time_frame: TimeFrame) -> Result<StockSeries> {
        let mut query: Vec<(&str, &str)> = vec![
            ("function", time_frame.api_function()),
            ("symbol", symbol),
            ("apikey", &self.api_key),
        ];
        if time_frame == TimeFrame::Hour {
            query.push(("interval", "60min"));
        }

        let resp = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("quote request for {symbol}"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("quote API request failed with status {}", status.as_u16());
        }

        let body: Value = resp
            .json()
            .await
            .with_context(|| format!("quote body for {symbol}"))?;

        if let Some(msg) = body.get("Error Message").and_then(Value::as_str) {
            bail!("quote API error: {msg}");
        }
        // Rate-limit note: serve synthetic data rather than an empty chart.
        if let Some(note) = body.get("Note").and_then(Value::as_str) {
            tracing::warn!(target: "quotes", symbol, note, "quote API call frequency warning");
            return Ok(synthetic::synthetic_series(symbol));
        }

        let series = body
            .get(time_frame.series_key())
            .and_then(Value::as_object)
            .ok_or_else(|| anyhow!("no time series data available for {symbol}"))?;

        let mut dates: Vec<&String> = series.keys().collect();
        dates.sort();
        dates.reverse();

        let mut bars = Vec::with_capacity(MAX_BARS.min(dates.len()));
        for date in dates.into_iter().take(MAX_BARS) {
            let bar = &series[date];
            bars.push(StockBar {
                symbol: symbol.to_string(),
                date: date.clone(),
                open: field(bar, "1. open")?,
                high: field(bar, "2. high")?,
                low: field(bar, "3. low")?,
                close: field(bar, "4. close")?,
                volume: field(bar, "5. volume")?,
            });
        }

        if bars.is_empty() {
            bail!("empty time series for {symbol}");
        }

        Ok(StockSeries::from_bars(symbol, bars, false))
    }

    fn name(&self) -> &'static str {
        "alphavantage"
    }
}

fn field(bar: &Value, key: &str) -> Result<f64> {
    bar.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("missing field {key}"))?
        .parse::<f64>()
        .with_context(|| format!("parsing field {key}"))
}
