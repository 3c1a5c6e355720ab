// src/portfolio.rs
//! Portfolio sidebar math: static holdings valued against current quotes.
//! The holdings table is fixed product data; there is no trading or
//! persistence behind it.

use std::collections::HashMap;

use serde::Serialize;

use crate::quotes::StockSeries;

#[derive(Debug, Clone, Copy)]
pub struct Holding {
    pub symbol: &'static str,
    pub name: &'static str,
    pub shares: f64,
}

pub const HOLDINGS: &[Holding] = &[
    Holding { symbol: "AAPL", name: "Apple Inc.", shares: 10.0 },
    Holding { symbol: "MSFT", name: "Microsoft Corp.", shares: 5.0 },
    Holding { symbol: "AMZN", name: "Amazon.com Inc.", shares: 8.0 },
    Holding { symbol: "GOOGL", name: "Alphabet Inc.", shares: 6.0 },
    Holding { symbol: "TSLA", name: "Tesla Inc.", shares: 4.0 },
    Holding { symbol: "META", name: "Meta Platforms Inc.", shares: 7.0 },
    Holding { symbol: "NVDA", name: "NVIDIA Corp.", shares: 3.0 },
    Holding { symbol: "JPM", name: "JPMorgan Chase & Co.", shares: 12.0 },
    Holding { symbol: "V", name: "Visa Inc.", shares: 9.0 },
    Holding { symbol: "WMT", name: "Walmart Inc.", shares: 15.0 },
    Holding { symbol: "JNJ", name: "Johnson & Johnson", shares: 8.0 },
    Holding { symbol: "PG", name: "Procter & Gamble Co.", shares: 10.0 },
    Holding { symbol: "XOM", name: "Exxon Mobil Corp.", shares: 14.0 },
    Holding { symbol: "BAC", name: "Bank of America Corp.", shares: 20.0 },
    Holding { symbol: "KO", name: "Coca-Cola Co.", shares: 18.0 },
];

#[derive(Debug, Clone, Serialize)]
pub struct ValuedHolding {
    pub symbol: String,
    pub name: String,
    pub shares: f64,
    pub price: f64,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub holdings: Vec<ValuedHolding>,
    pub total_value: f64,
    pub total_change: f64,
    pub total_change_percent: f64,
}

/// Case-insensitive substring match on symbol or company name.
pub fn filter_holdings<'a>(holdings: &'a [Holding], query: &str) -> Vec<&'a Holding> {
    let q = query.trim().to_ascii_lowercase();
    holdings
        .iter()
        .filter(|h| {
            q.is_empty()
                || h.symbol.to_ascii_lowercase().contains(&q)
                || h.name.to_ascii_lowercase().contains(&q)
        })
        .collect()
}

/// Values each holding against its quote series. Holdings whose quotes are
/// missing are skipped entirely, from both the list and the totals.
pub fn value_holdings(
    holdings: &[&Holding],
    quotes: &HashMap<String, StockSeries>,
) -> PortfolioSummary {
    let mut valued = Vec::with_capacity(holdings.len());
    let mut total_value = 0.0;
    let mut total_change = 0.0;

    for h in holdings {
        let Some(series) = quotes.get(h.symbol) else {
            continue;
        };
        let value = series.latest_price * h.shares;
        let change = series.change * h.shares;
        total_value += value;
        total_change += change;
        valued.push(ValuedHolding {
            symbol: h.symbol.to_string(),
            name: h.name.to_string(),
            shares: h.shares,
            price: series.latest_price,
            value,
            change,
            change_percent: series.change_percent,
        });
    }

    let prior = total_value - total_change;
    let total_change_percent = if prior != 0.0 {
        total_change / prior * 100.0
    } else {
        0.0
    };

    PortfolioSummary {
        holdings: valued,
        total_value,
        total_change,
        total_change_percent,
    }
}
