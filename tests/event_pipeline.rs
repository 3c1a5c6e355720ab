// tests/event_pipeline.rs
//
// Fixture-driven walk through the whole event slice: parse -> normalize ->
// store -> view adapters, asserting the lifecycle properties end to end.

use finance_insight_dashboard::events::fetcher::{EventSource, FixtureEventSource};
use finance_insight_dashboard::events::store::EventStore;
use finance_insight_dashboard::views::list::ListView;
use finance_insight_dashboard::views::pie::PieView;

const FIXTURE: &str = include_str!("fixtures/news_events.json");

async fn loaded_store() -> EventStore {
    let records = FixtureEventSource::from_fixture(FIXTURE)
        .fetch_events()
        .await
        .expect("fixture parses");
    let mut store = EventStore::new();
    store.load(records);
    store
}

#[tokio::test]
async fn load_initializes_flags_for_every_id_and_nothing_else() {
    let store = loaded_store().await;
    assert_eq!(store.len(), 4);
    for id in store.ids() {
        assert!(!store.is_expanded(id));
    }
}

#[tokio::test]
async fn reload_discards_expansion_state() {
    let mut store = loaded_store().await;
    store.toggle_expansion("evt-chip-rally");
    assert!(store.is_expanded("evt-chip-rally"));

    let records = FixtureEventSource::from_fixture(FIXTURE)
        .fetch_events()
        .await
        .unwrap();
    store.load(records);
    assert!(
        !store.is_expanded("evt-chip-rally"),
        "repeated id still resets to collapsed"
    );
}

#[tokio::test]
async fn list_and_pie_agree_on_the_collection() {
    let store = loaded_store().await;
    let list_model = ListView::new().render(&store);
    let pie_model = PieView::new().render(&store);

    assert_eq!(list_model.events.len(), pie_model.slices.len());
    for (ev, slice) in list_model.events.iter().zip(&pie_model.slices) {
        assert_eq!(ev.id, slice.id);
    }

    // Labels come from the first sentence of the summary.
    assert_eq!(
        pie_model.slices[0].label,
        "Fed signals a potential rate cut in September"
    );
    // No summary at all falls back to the generic label.
    assert_eq!(pie_model.slices[2].label, "Event");
}

#[tokio::test]
async fn pie_session_state_survives_selection_churn() {
    let store = loaded_store().await;
    let mut pie = PieView::new();

    pie.select("evt-fed-rates");
    pie.next_page(&store, "evt-fed-rates");
    pie.select("evt-chip-rally");
    pie.select("evt-fed-rates");

    let details = pie.selected_details(&store).expect("details");
    assert_eq!(details.page, 2, "switching selection must not reset pages");
}
