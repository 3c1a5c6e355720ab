// src/views/pie.rs
use std::collections::HashMap;

use rand::Rng;
use serde::Serialize;

use crate::events::store::EventStore;
use crate::views::{impact_label, short_summary, NewsModel};

/// Page size of the selected-event news pager.
pub const NEWS_PER_PAGE: usize = 5;

/// Stable color per event id for the lifetime of the loaded collection.
/// Owned by the pie view's session state, not an ambient cache; a reload
/// clears it, so a re-fetch may legitimately reassign hues.
#[derive(Debug, Default)]
pub struct ColorMap {
    colors: HashMap<String, String>,
}

impl ColorMap {
    pub fn color_for(&mut self, id: &str) -> String {
        self.colors
            .entry(id.to_string())
            .or_insert_with(|| {
                let hue = rand::rng().random_range(0..360);
                format!("hsl({hue}, 70%, 50%)")
            })
            .clone()
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PieSlice {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedEventModel {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub impact: String,
    pub expanded: bool,
    pub color: String,
    pub page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub news: Vec<NewsModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieRenderModel {
    pub loading: bool,
    pub error: Option<String>,
    pub show_graph: bool,
    pub slices: Vec<PieSlice>,
    pub selected: Option<SelectedEventModel>,
}

/// Pie view session state: selection, per-id 1-based pages, color map, and
/// the pie/graph toggle.
#[derive(Debug, Default)]
pub struct PieView {
    colors: ColorMap,
    selected: Option<String>,
    pages: HashMap<String, u32>,
    show_graph: bool,
}

impl PieView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slice selection. An empty id is a no-op (clicks on dead chart area).
    /// Selecting a slice initializes its page to 1 if unset and never touches
    /// other ids' pagination.
    pub fn select(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        self.selected = Some(id.to_string());
        self.pages.entry(id.to_string()).or_insert(1);
        true
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn toggle_graph(&mut self) -> bool {
        self.show_graph = !self.show_graph;
        self.show_graph
    }

    /// Drops all per-id state when a fresh collection replaces the old one.
    /// The pie/graph toggle is a view preference, not a per-id flag, so it
    /// survives.
    pub fn on_reload(&mut self, store: &EventStore) {
        self.colors.clear();
        self.pages.clear();
        if let Some(id) = &self.selected {
            if store.get(id).is_none() {
                self.selected = None;
            }
        }
        if let Some(id) = self.selected.clone() {
            self.pages.insert(id, 1);
        }
    }

    pub fn total_pages(news_count: usize) -> u32 {
        (news_count.div_ceil(NEWS_PER_PAGE) as u32).max(1)
    }

    pub fn current_page(&self, id: &str) -> u32 {
        self.pages.get(id).copied().unwrap_or(1)
    }

    /// Advances the pager; a no-op at the last page (the button is disabled
    /// there, this is the backstop).
    pub fn next_page(&mut self, store: &EventStore, id: &str) -> u32 {
        let Some(record) = store.get(id) else {
            return self.current_page(id);
        };
        let total = Self::total_pages(record.event.news_list.len());
        let page = self.pages.entry(id.to_string()).or_insert(1);
        if *page < total {
            *page += 1;
        }
        *page
    }

    /// Steps the pager back; a no-op at page 1.
    pub fn prev_page(&mut self, id: &str) -> u32 {
        let page = self.pages.entry(id.to_string()).or_insert(1);
        if *page > 1 {
            *page -= 1;
        }
        *page
    }

    /// One slice per record, in store order. Duplicated ids produce two
    /// slices sharing one color.
    pub fn slices(&mut self, store: &EventStore) -> Vec<PieSlice> {
        store
            .events()
            .iter()
            .map(|record| PieSlice {
                id: record.id.clone(),
                label: short_summary(&record.event),
                value: record.percentage,
                color: self.colors.color_for(&record.id),
            })
            .collect()
    }

    /// The current page's window of the selected event's news list.
    pub fn paginated_news(&self, store: &EventStore, id: &str) -> Vec<NewsModel> {
        let Some(record) = store.get(id) else {
            return Vec::new();
        };
        let page = self.current_page(id) as usize;
        let start = (page - 1) * NEWS_PER_PAGE;
        record
            .event
            .news_list
            .iter()
            .skip(start)
            .take(NEWS_PER_PAGE)
            .map(NewsModel::from_item)
            .collect()
    }

    pub fn selected_details(&mut self, store: &EventStore) -> Option<SelectedEventModel> {
        let id = self.selected.clone()?;
        let record = store.get(&id)?;

        let total_pages = Self::total_pages(record.event.news_list.len());
        let page = self.current_page(&id).min(total_pages);
        let color = self.colors.color_for(&id);

        Some(SelectedEventModel {
            id: id.clone(),
            title: short_summary(&record.event),
            summary: record.event.summary.clone(),
            impact: impact_label(record.percentage, record.percentage_known),
            expanded: store.is_expanded(&id),
            color,
            page,
            total_pages,
            has_prev: page > 1,
            has_next: page < total_pages,
            news: self.paginated_news(store, &id),
        })
    }

    pub fn render(&mut self, store: &EventStore) -> PieRenderModel {
        PieRenderModel {
            loading: store.loading(),
            error: store.error().map(str::to_string),
            show_graph: self.show_graph,
            slices: self.slices(store),
            selected: self.selected_details(store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{EventBody, EventRecord, NewsItem};

    fn record(id: &str, news_count: usize, percentage: f64) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            percentage,
            percentage_known: true,
            event: EventBody {
                event_id: id.to_string(),
                summary: Some(format!("Summary for {id}. More detail.")),
                news_list: (0..news_count)
                    .map(|i| NewsItem {
                        title: format!("headline {i}"),
                        link: format!("https://example.com/{i}"),
                        post_time: "20250428T2300".to_string(),
                        summary: None,
                    })
                    .collect(),
            },
        }
    }

    fn loaded_store(records: Vec<EventRecord>) -> EventStore {
        let mut store = EventStore::new();
        store.load(records);
        store
    }

    #[test]
    fn twelve_news_items_make_three_pages_with_clamped_navigation() {
        let store = loaded_store(vec![record("E1", 12, 40.0)]);
        let mut view = PieView::new();
        view.select("E1");

        assert_eq!(PieView::total_pages(12), 3);
        assert_eq!(view.current_page("E1"), 1);
        assert_eq!(view.prev_page("E1"), 1, "prev at page 1 stays put");

        assert_eq!(view.next_page(&store, "E1"), 2);
        assert_eq!(view.next_page(&store, "E1"), 3);
        assert_eq!(view.next_page(&store, "E1"), 3, "next at last page stays put");

        let details = view.selected_details(&store).unwrap();
        assert_eq!(details.page, 3);
        assert!(details.has_prev);
        assert!(!details.has_next);
        assert_eq!(details.news.len(), 2, "last page holds the remainder");
    }

    #[test]
    fn color_is_stable_within_one_collection() {
        let store = loaded_store(vec![record("E1", 1, 10.0), record("E2", 1, 20.0)]);
        let mut view = PieView::new();

        let first = view.slices(&store);
        let second = view.slices(&store);
        assert_eq!(first[0].color, second[0].color);
        assert_eq!(first[1].color, second[1].color);
        assert!(first[0].color.starts_with("hsl("));
    }

    #[test]
    fn selecting_a_slice_initializes_its_page_only() {
        let store = loaded_store(vec![record("E1", 12, 10.0), record("E2", 7, 20.0)]);
        let mut view = PieView::new();

        view.select("E1");
        view.next_page(&store, "E1");
        assert_eq!(view.current_page("E1"), 2);

        // Selecting another slice leaves E1's page alone.
        view.select("E2");
        assert_eq!(view.current_page("E1"), 2);
        assert_eq!(view.current_page("E2"), 1);

        // Re-selecting E1 keeps its prior page.
        view.select("E1");
        assert_eq!(view.current_page("E1"), 2);
    }

    #[test]
    fn empty_id_click_is_a_noop() {
        let mut view = PieView::new();
        assert!(!view.select(""));
        assert!(view.selected_id().is_none());
    }

    #[test]
    fn reload_resets_pages_and_drops_stale_selection() {
        let store = loaded_store(vec![record("E1", 12, 10.0)]);
        let mut view = PieView::new();
        view.select("E1");
        view.next_page(&store, "E1");

        let new_store = loaded_store(vec![record("E1", 12, 10.0), record("E9", 3, 5.0)]);
        view.on_reload(&new_store);
        assert_eq!(view.selected_id(), Some("E1"), "surviving id stays selected");
        assert_eq!(view.current_page("E1"), 1, "page resets with the flags");

        let shrunk = loaded_store(vec![record("E9", 3, 5.0)]);
        view.on_reload(&shrunk);
        assert!(view.selected_id().is_none(), "stale selection dropped");
    }

    #[test]
    fn slices_preserve_store_order_and_values() {
        let store = loaded_store(vec![record("B", 1, 30.0), record("A", 1, 70.0)]);
        let mut view = PieView::new();
        let slices = view.slices(&store);
        assert_eq!(slices[0].id, "B");
        assert_eq!(slices[0].value, 30.0);
        assert_eq!(slices[1].id, "A");
        assert_eq!(slices[1].value, 70.0);
        assert_eq!(slices[0].label, "Summary for B");
    }

    #[test]
    fn zero_news_still_renders_one_page() {
        let store = loaded_store(vec![record("E1", 0, 10.0)]);
        let mut view = PieView::new();
        view.select("E1");
        let details = view.selected_details(&store).unwrap();
        assert_eq!(details.total_pages, 1);
        assert!(!details.has_next);
        assert!(!details.has_prev);
        assert!(details.news.is_empty());
    }
}
