// src/events/mod.rs
pub mod fetcher;
pub mod store;
pub mod types;

use std::collections::HashMap;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram};
use once_cell::sync::OnceCell;

use crate::events::types::{EventRecord, RawEventRecord};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("news_events_total", "Total event records parsed from upstream.");
        describe_counter!(
            "news_duplicate_ids_total",
            "Event records sharing an id with an earlier record in the same fetch."
        );
        describe_counter!("news_fetch_errors_total", "Failed news fetches (any cause).");
        describe_histogram!("news_fetch_ms", "News fetch round-trip time in milliseconds.");
        describe_gauge!("news_last_fetch_ts", "Unix ts of the last successful news fetch.");
    });
}

/// Normalize free text coming from upstream summaries: decode HTML entities
/// and collapse runs of whitespace.
pub fn normalize_summary(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&decoded, " ").trim().to_string()
}

/// The single normalization step at the fetch boundary: raw wire records in,
/// canonical typed records out.
///
/// - `id` is backfilled from `event.event_id`, overwriting nothing downstream
///   ever sees (positional indices are never used as identity).
/// - `percentage` is coerced to a number; absent or non-numeric input becomes
///   0.0 with `percentage_known = false`.
/// - Duplicate ids are tolerated: both records are retained in input order,
///   the collision is logged at warn level and counted.
pub fn normalize_records(raw: Vec<RawEventRecord>) -> Vec<EventRecord> {
    ensure_metrics_described();

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(raw.len());

    for (index, rec) in raw.into_iter().enumerate() {
        let id = rec.event.event_id.clone();

        if let Some(&first) = first_seen.get(&id) {
            tracing::warn!(
                target: "events",
                id = %id,
                first_index = first,
                index,
                "duplicate event id from upstream"
            );
            counter!("news_duplicate_ids_total").increment(1);
        } else {
            first_seen.insert(id.clone(), index);
        }

        let mut event = rec.event;
        event.summary = event
            .summary
            .map(|s| normalize_summary(&s))
            .filter(|s| !s.is_empty());

        let (percentage, percentage_known) = match rec.percentage {
            Some(p) => (p, true),
            None => (0.0, false),
        };

        out.push(EventRecord {
            id,
            percentage,
            percentage_known,
            event,
        });
    }

    counter!("news_events_total").increment(out.len() as u64);
    out
}
