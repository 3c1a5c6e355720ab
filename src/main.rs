//! Finance Insight Dashboard — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use finance_insight_dashboard::metrics::Metrics;
use finance_insight_dashboard::{api, DashboardConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("finance_insight_dashboard=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments. This is where
    // ALPHAVANTAGE_API_KEY and NEWS_ENDPOINT come from locally.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = DashboardConfig::load()?;
    let metrics = Metrics::init(config.watched_symbols.len());

    let state = api::AppState::from_config(config.clone());

    // Warm the event store so the first page load has data. A failure here is
    // already reflected in the store's error field; the server still starts.
    {
        let state = state.clone();
        tokio::spawn(async move {
            let model = state.refresh_events().await;
            tracing::info!(
                events = model.events.len(),
                error = model.error.as_deref().unwrap_or(""),
                "initial news fetch done"
            );
        });
    }

    let router = api::create_router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "dashboard listening");
    axum::serve(listener, router).await?;

    Ok(())
}
