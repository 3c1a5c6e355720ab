// src/events/store.rs
//! In-memory event collection plus per-event UI flags. The whole collection
//! is replaced wholesale on every fetch; there is no incremental merge.

use std::collections::HashMap;

use crate::events::fetcher::FetchError;
use crate::events::types::EventRecord;

#[derive(Debug)]
pub struct EventStore {
    events: Vec<EventRecord>,
    expanded: HashMap<String, bool>,
    loading: bool,
    error: Option<String>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    /// Fresh store in the "first fetch pending" state.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            expanded: HashMap::new(),
            loading: true,
            error: None,
        }
    }

    /// Marks a fetch as in flight. Prior data stays visible until the fetch
    /// resolves one way or the other.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Wholesale replace. `expanded` is rebuilt with exactly the ids present
    /// in `records`, all collapsed; prior flags are discarded, including for
    /// ids that repeat between the old and new collections.
    pub fn load(&mut self, records: Vec<EventRecord>) {
        self.expanded = records.iter().map(|r| (r.id.clone(), false)).collect();
        self.events = records;
        self.loading = false;
        self.error = None;
    }

    /// A failed fetch yields an empty collection plus a visible error string.
    pub fn fail(&mut self, err: &FetchError) {
        self.events.clear();
        self.expanded.clear();
        self.error = Some(err.to_string());
        self.loading = false;
    }

    /// Applies a fetch result, whichever way it went.
    pub fn apply(&mut self, result: Result<Vec<EventRecord>, FetchError>) {
        match result {
            Ok(records) => self.load(records),
            Err(err) => self.fail(&err),
        }
    }

    /// Flips the expansion flag for `id`. Toggling an id that is not part of
    /// the current collection is a no-op and does not create a spurious
    /// entry; the return value says whether the id was known.
    pub fn toggle_expansion(&mut self, id: &str) -> bool {
        match self.expanded.get_mut(id) {
            Some(flag) => {
                *flag = !*flag;
                true
            }
            None => false,
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// First-wins lookup: when upstream ships duplicate ids, the earliest
    /// record answers for that id. All duplicates remain in `events`.
    pub fn get(&self, id: &str) -> Option<&EventRecord> {
        self.events.iter().find(|r| r.id == id)
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|r| r.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn expanded_map(&self) -> &HashMap<String, bool> {
        &self.expanded
    }
}
