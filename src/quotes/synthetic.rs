// src/quotes/synthetic.rs
//! Locally generated quote data with the same shape as the real series.
//! Served whenever the quote provider is rate-limited, erroring, or not
//! configured at all, so the dashboard never renders an empty chart.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use std::collections::HashMap;

use crate::quotes::{QuoteSource, StockBar, StockSeries, TimeFrame};

const DAYS: usize = 30;

static BASE_PRICES: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    HashMap::from([
        ("AAPL", 182.52),
        ("MSFT", 417.88),
        ("AMZN", 178.75),
        ("GOOGL", 163.42),
        ("TSLA", 177.58),
        ("META", 474.99),
        ("NVDA", 950.02),
        ("JPM", 198.47),
        ("V", 275.96),
        ("WMT", 68.23),
        ("JNJ", 152.50),
        ("PG", 165.87),
        ("XOM", 118.75),
        ("BAC", 38.92),
        ("KO", 62.34),
    ])
});

/// 30 days of random-walk bars anchored at the symbol's base price.
pub fn synthetic_series(symbol: &str) -> StockSeries {
    let mut rng = rand::rng();

    let base_price = BASE_PRICES
        .get(symbol)
        .copied()
        .unwrap_or_else(|| 100.0 + rng.random_range(0.0..200.0));

    // NVDA is more volatile.
    let volatility = if symbol == "NVDA" { 2.0 } else { 1.0 };

    let today = Utc::now().date_naive();
    let mut price = base_price;
    let mut bars = Vec::with_capacity(DAYS);

    for offset in (0..DAYS as i64).rev() {
        let date = today - Duration::days(offset);
        let daily_change = rng.random_range(-2.0..2.0) * volatility;
        price = (price + daily_change).max(1.0);

        let spread = price * 0.01;
        let open = price - daily_change / 2.0;
        bars.push(StockBar {
            symbol: symbol.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            open,
            high: price.max(open) + spread,
            low: price.min(open) - spread,
            close: price,
            volume: rng.random_range(1_000_000.0..50_000_000.0),
        });
    }

    // Newest first, like the real series.
    bars.reverse();
    StockSeries::from_bars(symbol, bars, true)
}

/// A [`QuoteSource`] that only ever generates data. Used when no API key is
/// configured and by tests.
pub struct SyntheticQuoteSource;

#[async_trait]
impl QuoteSource for SyntheticQuoteSource {
    async fn fetch(&self, symbol: &str, _time_frame: TimeFrame) -> anyhow::Result<StockSeries> {
        Ok(synthetic_series(symbol))
    }

    fn name(&self) -> &'static str {
        "synthetic"
    }
}
