// src/views/list.rs
use std::collections::HashMap;

use serde::Serialize;

use crate::events::store::EventStore;
use crate::events::types::EventRecord;
use crate::views::{impact_label, NewsModel};

/// How many news items an expanded event shows before "show more".
pub const NEWS_PREVIEW_LIMIT: usize = 5;
const SUMMARY_PREVIEW_CHARS: usize = 120;

#[derive(Debug, Clone, Serialize)]
pub struct ListRenderModel {
    pub loading: bool,
    pub error: Option<String>,
    pub events: Vec<ListEventModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListEventModel {
    pub id: String,
    pub heading: String,
    pub summary_preview: Option<String>,
    pub news_count: usize,
    pub impact: String,
    pub expanded: bool,
    pub show_more: bool,
    /// True when the event has more news than the preview limit and the
    /// "show more" toggle is still off.
    pub has_more: bool,
    /// Empty unless `expanded`.
    pub news: Vec<NewsModel>,
}

/// List view session state: the per-event "show more" toggles. Reset on every
/// reload, like all per-id UI flags.
#[derive(Debug, Default)]
pub struct ListView {
    show_more: HashMap<String, bool>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the show-more flag; no-op for ids outside the collection.
    pub fn toggle_show_more(&mut self, store: &EventStore, id: &str) -> bool {
        if store.get(id).is_none() {
            return false;
        }
        let flag = self.show_more.entry(id.to_string()).or_insert(false);
        *flag = !*flag;
        true
    }

    pub fn on_reload(&mut self) {
        self.show_more.clear();
    }

    pub fn render(&self, store: &EventStore) -> ListRenderModel {
        ListRenderModel {
            loading: store.loading(),
            error: store.error().map(str::to_string),
            events: store
                .events()
                .iter()
                .map(|record| self.event_model(store, record))
                .collect(),
        }
    }

    fn event_model(&self, store: &EventStore, record: &EventRecord) -> ListEventModel {
        let expanded = store.is_expanded(&record.id);
        let show_more = self.show_more.get(&record.id).copied().unwrap_or(false);
        let news_count = record.event.news_list.len();

        let news = if expanded {
            let visible = if show_more {
                news_count
            } else {
                news_count.min(NEWS_PREVIEW_LIMIT)
            };
            record.event.news_list[..visible]
                .iter()
                .map(NewsModel::from_item)
                .collect()
        } else {
            Vec::new()
        };

        ListEventModel {
            id: record.id.clone(),
            heading: format!("Event {}", record.event.event_id),
            summary_preview: record.event.summary.as_deref().map(preview),
            news_count,
            impact: impact_label(record.percentage, record.percentage_known),
            expanded,
            show_more,
            has_more: news_count > NEWS_PREVIEW_LIMIT && !show_more,
            news,
        }
    }
}

fn preview(summary: &str) -> String {
    if summary.chars().count() <= SUMMARY_PREVIEW_CHARS {
        summary.to_string()
    } else {
        let cut: String = summary.chars().take(SUMMARY_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{EventBody, NewsItem};

    fn news(n: usize) -> Vec<NewsItem> {
        (0..n)
            .map(|i| NewsItem {
                title: format!("headline {i}"),
                link: format!("https://www.example.com/{i}"),
                post_time: "20250428T2300".to_string(),
                summary: None,
            })
            .collect()
    }

    fn record(id: &str, news_count: usize) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            percentage: 42.0,
            percentage_known: true,
            event: EventBody {
                event_id: id.to_string(),
                summary: Some("Fed cuts rates. Markets rally.".to_string()),
                news_list: news(news_count),
            },
        }
    }

    fn loaded_store(records: Vec<EventRecord>) -> EventStore {
        let mut store = EventStore::new();
        store.load(records);
        store
    }

    #[test]
    fn collapsed_events_carry_no_news() {
        let store = loaded_store(vec![record("E1", 8)]);
        let model = ListView::new().render(&store);
        assert_eq!(model.events.len(), 1);
        assert!(!model.events[0].expanded);
        assert!(model.events[0].news.is_empty());
        assert_eq!(model.events[0].news_count, 8);
        assert_eq!(model.events[0].impact, "42% Impact");
    }

    #[test]
    fn expanded_events_cap_news_at_five_until_show_more() {
        let mut store = loaded_store(vec![record("E1", 8)]);
        store.toggle_expansion("E1");

        let mut view = ListView::new();
        let model = view.render(&store);
        assert_eq!(model.events[0].news.len(), NEWS_PREVIEW_LIMIT);
        assert!(model.events[0].has_more);

        assert!(view.toggle_show_more(&store, "E1"));
        let model = view.render(&store);
        assert_eq!(model.events[0].news.len(), 8);
        assert!(!model.events[0].has_more);
    }

    #[test]
    fn show_more_ignores_unknown_ids() {
        let store = loaded_store(vec![record("E1", 2)]);
        let mut view = ListView::new();
        assert!(!view.toggle_show_more(&store, "nope"));
    }

    #[test]
    fn error_state_surfaces_in_the_render_model() {
        let mut store = EventStore::new();
        store.apply(Err(crate::events::fetcher::FetchError::HttpStatus(503)));
        let model = ListView::new().render(&store);
        assert_eq!(
            model.error.as_deref(),
            Some("API request failed with status 503")
        );
        assert!(model.events.is_empty());
        assert!(!model.loading);
    }
}
