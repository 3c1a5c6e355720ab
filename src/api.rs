// src/api.rs
//! HTTP surface of the dashboard. The event store and the view adapters live
//! in shared state; UI interactions (refresh, toggle, select, page) arrive as
//! requests and are applied under the state locks one at a time, which
//! preserves the store's single-writer discipline.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::config::DashboardConfig;
use crate::events::fetcher::{EventSource, HttpEventSource};
use crate::events::store::EventStore;
use crate::market::{self, MarketOverviewModel};
use crate::portfolio::{self, PortfolioSummary, HOLDINGS};
use crate::quotes::alpha_vantage::AlphaVantageSource;
use crate::quotes::synthetic::SyntheticQuoteSource;
use crate::quotes::{QuoteService, StockSeries, TimeFrame};
use crate::views::graph::{self, GraphRenderModel};
use crate::views::list::{ListRenderModel, ListView};
use crate::views::pie::{PieRenderModel, PieView};

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<EventStore>>,
    list: Arc<RwLock<ListView>>,
    pie: Arc<RwLock<PieView>>,
    events: Arc<dyn EventSource>,
    quotes: Arc<QuoteService>,
    config: Arc<DashboardConfig>,
}

impl AppState {
    pub fn new(
        config: DashboardConfig,
        events: Arc<dyn EventSource>,
        quotes: QuoteService,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(EventStore::new())),
            list: Arc::new(RwLock::new(ListView::new())),
            pie: Arc::new(RwLock::new(PieView::new())),
            events,
            quotes: Arc::new(quotes),
            config: Arc::new(config),
        }
    }

    /// Wires the production collaborators: HTTP news source, and the Alpha
    /// Vantage quote client when a key is configured (synthetic data
    /// otherwise).
    pub fn from_config(config: DashboardConfig) -> Self {
        let client = reqwest::Client::new();
        let events: Arc<dyn EventSource> = Arc::new(HttpEventSource::new(
            client.clone(),
            config.news_endpoint.clone(),
        ));
        let quotes = if config.quote_api_key.is_empty() {
            tracing::info!(target: "quotes", "no quote API key configured, using synthetic data");
            QuoteService::new(Box::new(SyntheticQuoteSource))
        } else {
            QuoteService::new(Box::new(AlphaVantageSource::new(
                client,
                config.quote_base_url.clone(),
                config.quote_api_key.clone(),
            )))
        };
        Self::new(config, events, quotes)
    }

    /// One fetch cycle: mark loading, fetch, replace wholesale (or fail), and
    /// reset the per-id view state.
    pub async fn refresh_events(&self) -> ListRenderModel {
        self.store
            .write()
            .expect("store rwlock poisoned")
            .begin_load();

        // No lock is held across this await.
        let result = self.events.fetch_events().await;
        if let Err(err) = &result {
            tracing::warn!(
                target: "events",
                error = %err,
                source = self.events.name(),
                "news fetch failed"
            );
        }

        let mut store = self.store.write().expect("store rwlock poisoned");
        store.apply(result);

        let mut list = self.list.write().expect("list rwlock poisoned");
        list.on_reload();
        self.pie
            .write()
            .expect("pie rwlock poisoned")
            .on_reload(&store);

        list.render(&store)
    }

    async fn quotes_for(
        &self,
        symbols: &[String],
        time_frame: TimeFrame,
    ) -> HashMap<String, StockSeries> {
        let mut out = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            let series = self.quotes.series(symbol, time_frame).await;
            out.insert(symbol.clone(), series);
        }
        out
    }
}

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/news", get(get_news))
        .route("/api/news/refresh", post(refresh_news))
        .route("/api/news/{id}/toggle", post(toggle_expansion))
        .route("/api/news/{id}/show-more", post(toggle_show_more))
        .route("/api/news/pie", get(get_pie))
        .route("/api/news/pie/select", post(select_slice))
        .route("/api/news/pie/{id}/next-page", post(next_page))
        .route("/api/news/pie/{id}/prev-page", post(prev_page))
        .route("/api/news/pie/toggle-graph", post(toggle_graph))
        .route("/api/news/graph", get(get_graph))
        .route("/api/quotes/{symbol}", get(get_quote))
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/market", get(get_market))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

// ---- news: list view ----

async fn get_news(State(state): State<AppState>) -> Json<ListRenderModel> {
    let store = state.store.read().expect("store rwlock poisoned");
    let list = state.list.read().expect("list rwlock poisoned");
    Json(list.render(&store))
}

async fn refresh_news(State(state): State<AppState>) -> Json<ListRenderModel> {
    Json(state.refresh_events().await)
}

async fn toggle_expansion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ListRenderModel> {
    let mut store = state.store.write().expect("store rwlock poisoned");
    if !store.toggle_expansion(&id) {
        tracing::debug!(target: "api", id, "toggle for unknown event id ignored");
    }
    let list = state.list.read().expect("list rwlock poisoned");
    Json(list.render(&store))
}

async fn toggle_show_more(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ListRenderModel> {
    let store = state.store.read().expect("store rwlock poisoned");
    let mut list = state.list.write().expect("list rwlock poisoned");
    list.toggle_show_more(&store, &id);
    Json(list.render(&store))
}

// ---- news: pie view ----

#[derive(Deserialize)]
struct SelectReq {
    id: String,
}

async fn get_pie(State(state): State<AppState>) -> Json<PieRenderModel> {
    let store = state.store.read().expect("store rwlock poisoned");
    let mut pie = state.pie.write().expect("pie rwlock poisoned");
    Json(pie.render(&store))
}

async fn select_slice(
    State(state): State<AppState>,
    Json(body): Json<SelectReq>,
) -> Json<PieRenderModel> {
    let store = state.store.read().expect("store rwlock poisoned");
    let mut pie = state.pie.write().expect("pie rwlock poisoned");
    pie.select(&body.id);
    Json(pie.render(&store))
}

async fn next_page(State(state): State<AppState>, Path(id): Path<String>) -> Json<PieRenderModel> {
    let store = state.store.read().expect("store rwlock poisoned");
    let mut pie = state.pie.write().expect("pie rwlock poisoned");
    pie.next_page(&store, &id);
    Json(pie.render(&store))
}

async fn prev_page(State(state): State<AppState>, Path(id): Path<String>) -> Json<PieRenderModel> {
    let store = state.store.read().expect("store rwlock poisoned");
    let mut pie = state.pie.write().expect("pie rwlock poisoned");
    pie.prev_page(&id);
    Json(pie.render(&store))
}

async fn toggle_graph(State(state): State<AppState>) -> Json<PieRenderModel> {
    let store = state.store.read().expect("store rwlock poisoned");
    let mut pie = state.pie.write().expect("pie rwlock poisoned");
    pie.toggle_graph();
    Json(pie.render(&store))
}

async fn get_graph() -> Json<GraphRenderModel> {
    Json(graph::render())
}

// ---- quotes / portfolio / market ----

#[derive(Deserialize)]
struct QuoteQuery {
    #[serde(default)]
    time_frame: Option<TimeFrame>,
}

async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(q): Query<QuoteQuery>,
) -> Json<StockSeries> {
    let tf = q.time_frame.unwrap_or_default();
    Json(state.quotes.series(&symbol, tf).await)
}

#[derive(Deserialize)]
struct PortfolioQuery {
    #[serde(default)]
    query: Option<String>,
}

async fn get_portfolio(
    State(state): State<AppState>,
    Query(q): Query<PortfolioQuery>,
) -> Json<PortfolioSummary> {
    let holdings = portfolio::filter_holdings(HOLDINGS, q.query.as_deref().unwrap_or(""));
    let symbols: Vec<String> = holdings.iter().map(|h| h.symbol.to_string()).collect();
    let quotes = state.quotes_for(&symbols, TimeFrame::Day).await;
    Json(portfolio::value_holdings(&holdings, &quotes))
}

#[derive(Deserialize)]
struct MarketQuery {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    time_frame: Option<TimeFrame>,
}

async fn get_market(
    State(state): State<AppState>,
    Query(q): Query<MarketQuery>,
) -> Json<MarketOverviewModel> {
    let tf = q.time_frame.unwrap_or_default();
    let watched = state.config.watched_symbols.clone();
    let quotes = state.quotes_for(&watched, tf).await;
    Json(market::overview(&watched, &quotes, q.symbol.as_deref()))
}
