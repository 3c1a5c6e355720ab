// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod events;
pub mod market;
pub mod metrics;
pub mod portfolio;
pub mod quotes;
pub mod views;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::DashboardConfig;
pub use crate::events::fetcher::{EventSource, FetchError};
pub use crate::events::store::EventStore;
pub use crate::events::types::EventRecord;
