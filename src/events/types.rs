// src/events/types.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One article attached to an event, upstream field names preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    /// Fixed-width timestamp string, e.g. `20250428T2300`.
    pub post_time: String,
    #[serde(default)]
    pub summary: Option<String>,
}

/// The nested `Event` object of the upstream payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventBody {
    pub event_id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub news_list: Vec<NewsItem>,
}

/// One element of the upstream `/api/news` array, exactly as it arrives.
/// `Percentage` shows up as a number, a numeric string, or not at all;
/// everything non-numeric collapses to `None` here and downstream code
/// only ever sees the canonical [`EventRecord`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawEventRecord {
    #[serde(rename = "Event")]
    pub event: EventBody,
    #[serde(rename = "Percentage", default, deserialize_with = "de_percentage")]
    pub percentage: Option<f64>,
}

/// Canonical record produced by normalization at the fetch boundary.
///
/// `id` is always derived from `event.event_id` (never a positional index),
/// so identity survives re-fetches and re-orderings. `percentage` is the
/// coerced impact score; `percentage_known` is false when the upstream value
/// was absent or non-numeric, so views can render "Impact unknown" instead
/// of a fabricated 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub id: String,
    pub percentage: f64,
    pub percentage_known: bool,
    pub event: EventBody,
}

fn de_percentage<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_percentage(value.as_ref()))
}

/// Number passes through, numeric string parses, anything else is `None`.
pub fn coerce_percentage(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
