// src/market.rs
//! Market overview: the watched symbols' series collapsed into one headline
//! figure and one chart line (either a single symbol or the cross-symbol
//! average).

use std::collections::HashMap;

use serde::Serialize;

use crate::quotes::StockSeries;

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketOverviewModel {
    pub title: String,
    pub latest: f64,
    pub change_percent: f64,
    pub positive: bool,
    pub points: Vec<ChartPoint>,
}

/// Chart line, oldest first. With a selected symbol it is that symbol's
/// closes; otherwise each date of the first watched symbol is averaged over
/// whichever symbols have a bar on it.
pub fn chart_points(
    watched: &[String],
    quotes: &HashMap<String, StockSeries>,
    selected: Option<&str>,
) -> Vec<ChartPoint> {
    if let Some(series) = selected.and_then(|s| quotes.get(s)) {
        let mut points: Vec<ChartPoint> = series
            .bars
            .iter()
            .map(|b| ChartPoint {
                date: b.date.clone(),
                value: b.close,
            })
            .collect();
        points.reverse();
        return points;
    }

    let Some(reference) = watched.first().and_then(|s| quotes.get(s)) else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(reference.bars.len());
    for bar in &reference.bars {
        let closes: Vec<f64> = quotes
            .values()
            .filter_map(|s| s.bars.iter().find(|b| b.date == bar.date))
            .map(|b| b.close)
            .collect();
        if closes.is_empty() {
            continue;
        }
        points.push(ChartPoint {
            date: bar.date.clone(),
            value: closes.iter().sum::<f64>() / closes.len() as f64,
        });
    }
    points.reverse();
    points
}

pub fn overview(
    watched: &[String],
    quotes: &HashMap<String, StockSeries>,
    selected: Option<&str>,
) -> MarketOverviewModel {
    let (title, latest, change_percent) = match selected.and_then(|s| quotes.get(s)) {
        Some(series) => (
            format!("{} Performance", series.symbol),
            series.latest_price,
            series.change_percent,
        ),
        None => {
            let n = quotes.len().max(1) as f64;
            let latest = quotes.values().map(|s| s.latest_price).sum::<f64>() / n;
            let change = quotes.values().map(|s| s.change_percent).sum::<f64>() / n;
            ("Market Overview".to_string(), latest, change)
        }
    };

    MarketOverviewModel {
        title,
        latest,
        change_percent,
        positive: change_percent >= 0.0,
        points: chart_points(watched, quotes, selected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quotes::StockBar;

    fn series(symbol: &str, closes: &[(&str, f64)]) -> StockSeries {
        let bars = closes
            .iter()
            .map(|(date, close)| StockBar {
                symbol: symbol.to_string(),
                date: date.to_string(),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: 0.0,
            })
            .collect();
        StockSeries::from_bars(symbol, bars, false)
    }

    fn watched() -> Vec<String> {
        vec!["AAPL".to_string(), "MSFT".to_string()]
    }

    fn quotes() -> HashMap<String, StockSeries> {
        let mut q = HashMap::new();
        q.insert(
            "AAPL".to_string(),
            series("AAPL", &[("2025-04-30", 110.0), ("2025-04-29", 100.0)]),
        );
        q.insert(
            "MSFT".to_string(),
            series("MSFT", &[("2025-04-30", 210.0), ("2025-04-29", 200.0)]),
        );
        q
    }

    #[test]
    fn selected_symbol_drives_title_and_points() {
        let model = overview(&watched(), &quotes(), Some("AAPL"));
        assert_eq!(model.title, "AAPL Performance");
        assert_eq!(model.latest, 110.0);
        assert!(model.positive);
        // Oldest first.
        assert_eq!(model.points[0].date, "2025-04-29");
        assert_eq!(model.points[0].value, 100.0);
        assert_eq!(model.points[1].value, 110.0);
    }

    #[test]
    fn averages_across_symbols_without_selection() {
        let model = overview(&watched(), &quotes(), None);
        assert_eq!(model.title, "Market Overview");
        assert_eq!(model.latest, 160.0); // (110 + 210) / 2
        assert_eq!(model.points.len(), 2);
        assert_eq!(model.points[1].value, 160.0);
    }

    #[test]
    fn missing_quotes_yield_an_empty_chart() {
        let model = overview(&watched(), &HashMap::new(), None);
        assert!(model.points.is_empty());
    }
}
