// src/views/mod.rs
//! View adapters: pure projections of the event store into view-specific
//! render models. Adapters own their own ephemeral UI state (show-more map,
//! color map, pagination) and never mutate the store.

pub mod graph;
pub mod list;
pub mod pie;

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

use crate::events::types::{EventBody, NewsItem};

pub const SHORT_SUMMARY_MAX_CHARS: usize = 60;

/// Render model for one news article, shared between list and pie views.
#[derive(Debug, Clone, Serialize)]
pub struct NewsModel {
    pub title: String,
    pub link: String,
    pub source: String,
    pub posted: String,
    pub summary: Option<String>,
}

impl NewsModel {
    pub fn from_item(item: &NewsItem) -> Self {
        Self {
            title: item.title.clone(),
            link: item.link.clone(),
            source: domain_from_url(&item.link),
            posted: format_post_time(&item.post_time),
            summary: item.summary.clone(),
        }
    }
}

/// Short label for an event: the first sentence of its summary, truncated
/// line-break-aware to at most 60 characters; "Event" when there is no
/// summary at all.
pub fn short_summary(event: &EventBody) -> String {
    let Some(summary) = event
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return "Event".to_string();
    };

    let first_sentence = summary.split('.').next().unwrap_or(summary).trim();
    if first_sentence.chars().count() <= SHORT_SUMMARY_MAX_CHARS {
        return first_sentence.to_string();
    }

    // Cut at a line break when one occurs early enough, otherwise hard-cut,
    // keeping the ellipsis inside the budget.
    let first_line = first_sentence.lines().next().unwrap_or(first_sentence);
    let cut: String = first_line
        .chars()
        .take(SHORT_SUMMARY_MAX_CHARS - 3)
        .collect();
    format!("{}...", cut.trim_end())
}

/// `"{p}% Impact"` for known percentages, `"Impact unknown"` otherwise.
pub fn impact_label(percentage: f64, known: bool) -> String {
    if !known {
        return "Impact unknown".to_string();
    }
    if percentage.fract() == 0.0 {
        format!("{:.0}% Impact", percentage)
    } else {
        format!("{}% Impact", percentage)
    }
}

/// `YYYYMMDDTHHMM` timestamps to a reader-friendly form: "Today at HH:MM",
/// "Yesterday at HH:MM", "N days ago", or "DD/MM/YYYY HH:MM". Empty input
/// becomes "Unknown time"; anything unparseable is echoed back verbatim.
pub fn format_post_time(post_time: &str) -> String {
    format_post_time_at(post_time, Utc::now().naive_utc())
}

fn format_post_time_at(post_time: &str, now: NaiveDateTime) -> String {
    if post_time.is_empty() {
        return "Unknown time".to_string();
    }

    let Ok(posted) = NaiveDateTime::parse_from_str(post_time, "%Y%m%dT%H%M") else {
        tracing::debug!(target: "views", post_time, "unparseable post_time");
        return post_time.to_string();
    };

    let clock = posted.format("%H:%M");
    let days = (now.date() - posted.date()).num_days();
    match days {
        0 => format!("Today at {clock}"),
        1 => format!("Yesterday at {clock}"),
        2..=6 => format!("{days} days ago"),
        _ => posted.format("%d/%m/%Y %H:%M").to_string(),
    }
}

/// Hostname without a leading `www.`; invalid URLs are echoed back.
pub fn domain_from_url(link: &str) -> String {
    url::Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| link.to_string())
}
