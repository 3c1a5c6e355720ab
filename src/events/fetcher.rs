// src/events/fetcher.rs
use async_trait::async_trait;
use metrics::{counter, gauge, histogram};

use crate::events::normalize_records;
use crate::events::types::{EventRecord, RawEventRecord};

/// What can go wrong at the fetch boundary. All three variants are caught at
/// the API layer and rendered as the store's user-visible error string; none
/// of them may propagate further.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("API request failed with status {0}")]
    HttpStatus(u16),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response body: {0}")]
    Parse(String),
}

#[async_trait]
pub trait EventSource: Send + Sync {
    /// One shot, no retry, no cache. Returns normalized records on success.
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FetchError>;
    fn name(&self) -> &'static str;
}

/// Production source: one GET against the configured news endpoint.
pub struct HttpEventSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEventSource {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FetchError> {
        let t0 = std::time::Instant::now();

        let resp = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| {
                counter!("news_fetch_errors_total").increment(1);
                FetchError::Transport(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            counter!("news_fetch_errors_total").increment(1);
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let raw: Vec<RawEventRecord> = resp.json().await.map_err(|e| {
            counter!("news_fetch_errors_total").increment(1);
            FetchError::Parse(e.to_string())
        })?;

        let records = normalize_records(raw);

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("news_fetch_ms").record(ms);
        gauge!("news_last_fetch_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
        tracing::info!(target: "events", count = records.len(), ms, "news fetch ok");

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "news-api"
    }
}

/// Fixture-backed source: parses a JSON payload held in memory. Used by
/// integration tests and by local runs without network access.
pub struct FixtureEventSource {
    json: String,
}

impl FixtureEventSource {
    pub fn from_fixture(content: &str) -> Self {
        Self {
            json: content.to_string(),
        }
    }
}

#[async_trait]
impl EventSource for FixtureEventSource {
    async fn fetch_events(&self) -> Result<Vec<EventRecord>, FetchError> {
        let raw: Vec<RawEventRecord> =
            serde_json::from_str(&self.json).map_err(|e| FetchError::Parse(e.to_string()))?;
        Ok(normalize_records(raw))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
