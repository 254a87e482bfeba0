//! The chapters store.
//!
//! Holds the catalog, the active filters and the filtered view derived from
//! them, together with the load status. Every mutation goes through a
//! `&mut self` method that finishes by recomputing the filtered view, so
//! `filtered_chapters() == evaluate(chapters(), filters())` holds after each
//! call returns.
//!
//! Loads run on the tokio runtime. Their results are applied when the owner
//! calls [`ChaptersStore::poll`] (once per frame in the GUI) or awaits
//! [`ChaptersStore::settle`] (CLI and tests). Overlapping loads are neither
//! deduplicated nor cancelled: each one applies when it finishes, so the last
//! to finish wins.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::catalog::{ChapterSource, LoadResult};
use crate::chapter::Chapter;
use crate::filter::{evaluate, FilterField, FilterState, Selection};
use crate::task::{poll_set, PollResult};

/// Message recorded when a failed load carries no message of its own
pub const LOAD_FALLBACK_ERROR: &str = "Failed to fetch chapters";

/// Load lifecycle as seen by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing loaded or requested yet
    Idle,
    /// A load is in flight
    Loading,
    /// The catalog has been loaded and no error is recorded
    Loaded,
    /// The most recent load failed
    Errored,
}

impl LoadStatus {
    pub fn description(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "Ready",
            LoadStatus::Loading => "Loading chapters...",
            LoadStatus::Loaded => "Chapters loaded",
            LoadStatus::Errored => "Failed to load chapters",
        }
    }
}

/// What a completed load did, reported back to the owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Catalog replaced; counts are for the full and the filtered list
    Loaded { total: usize, shown: usize },
    /// Load failed with this message
    LoadFailed(String),
}

/// Plain store data
#[derive(Debug, Clone, Default)]
pub struct ChaptersState {
    chapters: Vec<Chapter>,
    filtered_chapters: Vec<Chapter>,
    loading: bool,
    error: Option<String>,
    filters: FilterState,
    loaded: bool,
}

impl ChaptersState {
    fn recompute(&mut self) {
        self.filtered_chapters = evaluate(&self.chapters, &self.filters);
    }

    fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn finish_load(&mut self, outcome: Result<Vec<Chapter>, String>) -> StoreEvent {
        self.loading = false;
        match outcome {
            Ok(chapters) => {
                self.chapters = chapters;
                self.error = None;
                self.loaded = true;
                self.recompute();
                StoreEvent::Loaded {
                    total: self.chapters.len(),
                    shown: self.filtered_chapters.len(),
                }
            }
            Err(message) => {
                // Catalog and filtered view keep their last known value
                let message = if message.trim().is_empty() {
                    LOAD_FALLBACK_ERROR.to_string()
                } else {
                    message
                };
                self.error = Some(message.clone());
                StoreEvent::LoadFailed(message)
            }
        }
    }

    fn set_selection(&mut self, field: FilterField, selection: Selection) {
        self.filters.set_selection(field, selection);
        self.recompute();
    }

    fn status(&self) -> LoadStatus {
        if self.loading {
            LoadStatus::Loading
        } else if self.error.is_some() {
            LoadStatus::Errored
        } else if self.loaded {
            LoadStatus::Loaded
        } else {
            LoadStatus::Idle
        }
    }
}

/// Store owning the chapter catalog, filters and derived view
pub struct ChaptersStore {
    state: ChaptersState,
    source: Arc<dyn ChapterSource>,
    pending: JoinSet<LoadResult>,
    revision: watch::Sender<u64>,
}

impl ChaptersStore {
    /// Create an idle store with default filters
    pub fn new(source: Arc<dyn ChapterSource>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: ChaptersState::default(),
            source,
            pending: JoinSet::new(),
            revision,
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Start loading the catalog. Must be called within a tokio runtime.
    pub fn load(&mut self) {
        tracing::info!("Loading chapters from {}", self.source.describe());
        self.state.begin_load();
        self.pending.spawn(self.source.load());
        self.bump();
    }

    /// Replace the catalog source used by later loads. Loads already in
    /// flight still finish and apply; current data stays until the next load.
    pub fn set_source(&mut self, source: Arc<dyn ChapterSource>) {
        tracing::info!("Chapter source set to {}", source.describe());
        self.source = source;
    }

    /// Apply every load that has finished since the last call
    pub fn poll(&mut self) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        loop {
            match poll_set(&mut self.pending) {
                PollResult::Complete(result) => events.push(self.apply(result)),
                PollResult::Pending | PollResult::NoTask => break,
            }
        }
        events
    }

    /// Wait for every in-flight load, applying each as it finishes
    pub async fn settle(&mut self) -> Vec<StoreEvent> {
        let mut events = Vec::new();
        while let Some(result) = self.pending.join_next().await {
            events.push(self.apply(result));
        }
        events
    }

    /// Set a filter from its string form. The value is not validated; an
    /// unknown value is stored as is and simply matches nothing.
    pub fn set_filter(&mut self, field: FilterField, value: &str) {
        self.set_selection(field, field.decode(value));
    }

    /// Set a filter from an already decoded selection
    pub fn set_selection(&mut self, field: FilterField, selection: Selection) {
        tracing::debug!("Filter {} = {}", field, selection);
        self.state.set_selection(field, selection);
        self.bump();
    }

    /// Watch for changes. The value is a revision counter bumped after
    /// every mutation; read the selectors to see what changed.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    // ------------------------------------------------------------------
    // Selectors
    // ------------------------------------------------------------------

    pub fn filtered_chapters(&self) -> &[Chapter] {
        &self.state.filtered_chapters
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.state.chapters
    }

    pub fn loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.state.filters
    }

    pub fn status(&self) -> LoadStatus {
        self.state.status()
    }

    /// Whether any load task is still running
    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    fn apply(&mut self, result: Result<LoadResult, tokio::task::JoinError>) -> StoreEvent {
        let outcome = match result {
            Ok(Ok(chapters)) => Ok(chapters),
            Ok(Err(e)) => Err(e.to_string()),
            Err(e) => Err(format!("Load task panicked: {}", e)),
        };
        let event = self.state.finish_load(outcome);
        match &event {
            StoreEvent::Loaded { total, shown } => {
                tracing::info!("Loaded {} chapters ({} shown)", total, shown)
            }
            StoreEvent::LoadFailed(message) => {
                tracing::error!("Failed to load chapters: {}", message)
            }
        }
        self.bump();
        event
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::{PanickingSource, ScriptedSource};
    use crate::chapter::fixtures::chapter;
    use crate::chapter::{Status, Subject};
    use std::time::Duration;

    fn three_chapters() -> Vec<Chapter> {
        vec![
            chapter(Subject::Physics, "Vectors", "Algebra", "Class 11", Status::NotStarted, Some(true)),
            chapter(Subject::Physics, "Kinematics", "Calculus", "Class 12", Status::InProgress, Some(false)),
            chapter(Subject::Chemistry, "Alkanes", "Organic", "Class 11", Status::Completed, Some(true)),
        ]
    }

    fn store_with(source: ScriptedSource) -> ChaptersStore {
        ChaptersStore::new(Arc::new(source))
    }

    fn assert_consistent(store: &ChaptersStore) {
        assert_eq!(
            store.filtered_chapters(),
            evaluate(store.chapters(), store.filters()).as_slice()
        );
    }

    #[test]
    fn test_new_store_is_idle() {
        let store = store_with(ScriptedSource::ok(vec![]));
        assert_eq!(store.status(), LoadStatus::Idle);
        assert!(!store.loading());
        assert!(store.error().is_none());
        assert!(store.chapters().is_empty());
        assert_eq!(store.filters(), &FilterState::default());
        assert_eq!(store.filters().encoded(FilterField::Subject), "Physics");
    }

    #[tokio::test]
    async fn test_load_then_settle() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        store.load();
        assert_eq!(store.status(), LoadStatus::Loading);
        assert!(store.loading());

        let events = store.settle().await;
        assert_eq!(events, vec![StoreEvent::Loaded { total: 3, shown: 2 }]);
        assert_eq!(store.status(), LoadStatus::Loaded);
        assert_eq!(store.chapters().len(), 3);
        // Default filters show Physics only
        assert_eq!(store.filtered_chapters().len(), 2);
        assert_consistent(&store);
    }

    #[tokio::test]
    async fn test_end_to_end_subject_and_weak() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        store.load();
        store.settle().await;

        store.set_filter(FilterField::Subject, "Physics");
        store.set_filter(FilterField::Weak, "true");

        let names: Vec<&str> = store
            .filtered_chapters()
            .iter()
            .map(|c| c.chapter.as_str())
            .collect();
        assert_eq!(names, vec!["Vectors"]);
        assert_consistent(&store);
    }

    #[tokio::test]
    async fn test_error_keeps_previous_chapters() {
        let mut store = store_with(ScriptedSource::new(vec![
            (Duration::ZERO, Ok(three_chapters())),
            (Duration::ZERO, Err("network down".to_string())),
        ]));
        store.load();
        store.settle().await;
        let before = store.chapters().to_vec();
        let filtered_before = store.filtered_chapters().to_vec();

        store.load();
        let events = store.settle().await;

        assert_eq!(events, vec![StoreEvent::LoadFailed("network down".to_string())]);
        assert_eq!(store.error(), Some("network down"));
        assert!(!store.loading());
        assert_eq!(store.status(), LoadStatus::Errored);
        assert_eq!(store.chapters(), before.as_slice());
        assert_eq!(store.filtered_chapters(), filtered_before.as_slice());
    }

    #[tokio::test]
    async fn test_reselecting_subject_clears_other_filters() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        store.load();
        store.settle().await;
        store.set_filter(FilterField::Class, "11");
        store.set_filter(FilterField::Weak, "true");
        assert_eq!(store.filtered_chapters().len(), 1);

        store.set_filter(FilterField::Subject, "Physics");
        assert_eq!(store.filters(), &FilterState::default());
        assert_eq!(store.filtered_chapters().len(), 2);
        assert_consistent(&store);
    }

    #[tokio::test]
    async fn test_panicked_load_is_a_failure() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        store.load();
        store.settle().await;
        let before = store.chapters().to_vec();

        store.set_source(Arc::new(PanickingSource));
        store.load();
        let events = store.settle().await;

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], StoreEvent::LoadFailed(message) if message.starts_with("Load task panicked")));
        assert_eq!(store.status(), LoadStatus::Errored);
        assert!(!store.loading());
        assert!(store.error().is_some_and(|e| e.starts_with("Load task panicked")));
        assert_eq!(store.chapters(), before.as_slice());
        assert_consistent(&store);
    }

    #[tokio::test]
    async fn test_error_without_message_uses_fallback() {
        let mut store = store_with(ScriptedSource::new(vec![(Duration::ZERO, Err(String::new()))]));
        store.load();
        store.settle().await;
        assert_eq!(store.error(), Some(LOAD_FALLBACK_ERROR));
        assert!(store.chapters().is_empty());
    }

    #[tokio::test]
    async fn test_reload_clears_error() {
        let mut store = store_with(ScriptedSource::new(vec![
            (Duration::ZERO, Err("timeout".to_string())),
            (Duration::ZERO, Ok(three_chapters())),
        ]));
        store.load();
        store.settle().await;
        assert_eq!(store.status(), LoadStatus::Errored);

        store.load();
        assert!(store.error().is_none());
        assert_eq!(store.status(), LoadStatus::Loading);
        store.settle().await;
        assert_eq!(store.status(), LoadStatus::Loaded);
    }

    #[tokio::test]
    async fn test_set_filter_does_not_touch_load_state() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        store.load();
        store.set_filter(FilterField::Unit, "Algebra");
        assert!(store.loading());
        assert!(store.error().is_none());
        // Catalog not loaded yet, so nothing passes
        assert!(store.filtered_chapters().is_empty());

        store.settle().await;
        // Filters set during the load apply to the loaded catalog
        assert_eq!(store.filtered_chapters().len(), 1);
        assert_consistent(&store);
    }

    #[tokio::test]
    async fn test_subject_switch_resets_dependents() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        store.load();
        store.settle().await;
        store.set_filter(FilterField::Unit, "Algebra,Calculus");
        store.set_filter(FilterField::Class, "11");
        store.set_filter(FilterField::Status, "Not Started");
        store.set_filter(FilterField::Weak, "true");

        store.set_filter(FilterField::Subject, "Chemistry");

        let filters = store.filters();
        assert_eq!(filters.encoded(FilterField::Subject), "Chemistry");
        assert_eq!(filters.encoded(FilterField::Unit), "all");
        assert_eq!(filters.encoded(FilterField::Class), "all");
        assert_eq!(filters.encoded(FilterField::Status), "all");
        assert_eq!(filters.encoded(FilterField::Weak), "all");
        assert_eq!(store.filtered_chapters().len(), 1);
        assert_consistent(&store);
    }

    #[tokio::test]
    async fn test_invalid_filter_value_is_stored() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        store.load();
        store.settle().await;
        store.set_filter(FilterField::Status, "Paused");
        assert_eq!(store.filters().encoded(FilterField::Status), "Paused");
        assert!(store.filtered_chapters().is_empty());
        assert!(store.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_loads_apply_in_completion_order() {
        let slow = vec![chapter(Subject::Physics, "Slow", "Optics", "Class 12", Status::NotStarted, None)];
        let fast = vec![chapter(Subject::Physics, "Fast", "Optics", "Class 12", Status::NotStarted, None)];
        let mut store = store_with(ScriptedSource::new(vec![
            (Duration::from_millis(500), Ok(slow)),
            (Duration::from_millis(100), Ok(fast)),
        ]));

        store.load();
        store.load();
        let events = store.settle().await;

        assert_eq!(events.len(), 2);
        // The first load finished last, so its data wins
        assert_eq!(store.chapters()[0].chapter, "Slow");
        assert!(!store.loading());
        assert_consistent(&store);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_applies_finished_load() {
        let mut store = store_with(ScriptedSource::new(vec![(
            Duration::from_millis(1000),
            Ok(three_chapters()),
        )]));
        store.load();
        assert!(store.poll().is_empty());
        assert!(store.is_busy());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let events = store.poll();
        assert_eq!(events.len(), 1);
        assert!(!store.is_busy());
        assert_eq!(store.status(), LoadStatus::Loaded);
        assert!(store.poll().is_empty());
    }

    #[tokio::test]
    async fn test_set_source_keeps_filters() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        store.load();
        store.settle().await;
        store.set_filter(FilterField::Subject, "Chemistry");

        let replacement = vec![chapter(Subject::Chemistry, "Amines", "Organic", "Class 12", Status::NotStarted, None)];
        store.set_source(Arc::new(ScriptedSource::ok(replacement)));
        // Nothing changes until the next load
        assert_eq!(store.chapters().len(), 3);

        store.load();
        store.settle().await;
        assert_eq!(store.filters().encoded(FilterField::Subject), "Chemistry");
        assert_eq!(store.filtered_chapters()[0].chapter, "Amines");
        assert_consistent(&store);
    }

    #[tokio::test]
    async fn test_subscribe_sees_every_mutation() {
        let mut store = store_with(ScriptedSource::ok(three_chapters()));
        let mut rx = store.subscribe();
        let start = *rx.borrow_and_update();

        store.load();
        assert!(rx.has_changed().unwrap());
        store.settle().await;
        store.set_filter(FilterField::Weak, "true");

        // load, load completion, filter change
        assert_eq!(*rx.borrow_and_update(), start + 3);
    }
}
