//! Table-state controller shared by the admin list views.
//!
//! A [`TableQueryController`] turns widget events (search keystrokes, sort
//! header clicks, filter selections, pagination clicks) into one coherent
//! [`QueryState`]. Every committed change bumps the revision, is saved to the
//! [`StateStore`] and is pushed to subscribers, which re-issue the data fetch.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::query::{DEFAULT_PAGE_SIZE, QueryState, SortOrder, is_cleared_filter_value};

pub mod debounce;
pub mod params;
pub mod store;

use debounce::{Clock, Debouncer, SystemClock};
use params::RESERVED_PARAMS;
use store::{MemoryStateStore, StateStore};

/// Quiet period applied to the search box when none is configured.
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ControllerConfig {
    /// Page size used for fresh views and to replace a zero limit.
    pub default_limit: usize,
    pub debounce_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl ControllerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// A UI event understood by the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableEvent {
    Search(String),
    Page(usize),
    Limit(usize),
    Sort(String),
    Filter { key: String, value: String },
    ClearFilters,
    Reset,
}

/// Handle returned by [`TableQueryController::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

type Listener = Box<dyn FnMut(&QueryState)>;

/// Owns the query state of a single list view.
pub struct TableQueryController<S = MemoryStateStore, C = SystemClock> {
    config: ControllerConfig,
    state: QueryState,
    search_input: String,
    debouncer: Debouncer<String>,
    store: S,
    clock: C,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: usize,
    revision: u64,
}

impl TableQueryController {
    /// Controller with in-memory state and the wall clock.
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_store(config, MemoryStateStore::new())
    }
}

impl<S: StateStore> TableQueryController<S> {
    pub fn with_store(config: ControllerConfig, store: S) -> Self {
        Self::with_store_and_clock(config, store, SystemClock)
    }
}

impl<S: StateStore, C: Clock> TableQueryController<S, C> {
    /// Mounts the view: the initial state comes from `store` or the defaults.
    pub fn with_store_and_clock(config: ControllerConfig, store: S, clock: C) -> Self {
        let state = store
            .load_state()
            .map(|state| state.normalized(config.default_limit))
            .unwrap_or_else(|| QueryState::new(config.default_limit));

        Self {
            debouncer: Debouncer::new(config.debounce()),
            search_input: state.search.clone(),
            config,
            state,
            store,
            clock,
            listeners: Vec::new(),
            next_subscription: 0,
            revision: 0,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// State to fetch with.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Raw text of the search box, echoed back to the input.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Search value used for querying.
    pub fn debounced_search(&self) -> &str {
        &self.state.search
    }

    pub fn pending_search(&self) -> Option<&str> {
        self.debouncer.pending().map(String::as_str)
    }

    /// Number of commits since the view was mounted.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Records a keystroke; the value is committed by [`poll`](Self::poll)
    /// once the debounce window passes without another keystroke.
    pub fn update_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search_input.clone_from(&text);
        if let Some(superseded) = self.debouncer.schedule(text, self.clock.now()) {
            log::trace!("Search `{superseded}` superseded before commit");
        }
    }

    /// Commits a pending search whose quiet period is over.
    ///
    /// Returns `true` when the committed search differs from the current one.
    pub fn poll(&mut self) -> bool {
        match self.debouncer.poll(self.clock.now()) {
            Some(search) => self.commit_search(search),
            None => false,
        }
    }

    /// Commits the pending search right away, e.g. when Enter is pressed.
    pub fn flush_search(&mut self) -> bool {
        match self.debouncer.flush() {
            Some(search) => self.commit_search(search),
            None => false,
        }
    }

    /// Jumps to `page`. The upper bound is the caller's concern.
    pub fn update_page(&mut self, page: usize) {
        if page == 0 {
            log::warn!("Page 0 requested, using page 1");
        }
        self.state.page = page.max(1);
        self.commit();
    }

    pub fn update_limit(&mut self, limit: usize) {
        let default_limit = self.config.default_limit.max(1);
        if limit == 0 {
            log::warn!("Page size 0 requested, using {default_limit}");
        }
        self.state.limit = if limit == 0 { default_limit } else { limit };
        self.state.page = 1;
        self.commit();
    }

    /// Sorts by `field`, flipping the direction when it is already the sort field.
    pub fn update_sort(&mut self, field: impl Into<String>) {
        let field = field.into();
        let order = match self.state.sort() {
            Some((current, order)) if current == field => order.toggled(),
            _ => SortOrder::Asc,
        };
        self.state.sort_by = Some(field);
        self.state.sort_order = Some(order);
        self.state.page = 1;
        self.commit();
    }

    /// Sets one filter; an empty or `all` value removes the key.
    ///
    /// Reserved query parameters (`page`, `size`, `search`, `sort`) are not
    /// filters and are ignored.
    pub fn update_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if RESERVED_PARAMS.contains(&key.as_str()) {
            log::warn!("Ignoring filter on reserved parameter `{key}`");
            return;
        }
        if is_cleared_filter_value(&value) {
            self.state.filters.remove(&key);
        } else {
            self.state.filters.insert(key, value);
        }
        self.state.page = 1;
        self.commit();
    }

    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.page = 1;
        self.commit();
    }

    /// Back to the defaults; a pending search is dropped.
    pub fn reset(&mut self) {
        self.debouncer.cancel();
        self.search_input.clear();
        self.state = QueryState::new(self.config.default_limit);
        self.commit();
    }

    /// Re-reads the state from the store after external navigation.
    ///
    /// Returns `true` when the stored state differs from the current one.
    pub fn reload(&mut self) -> bool {
        let Some(stored) = self.store.load_state() else {
            return false;
        };
        let stored = stored.normalized(self.config.default_limit);
        if stored == self.state {
            return false;
        }

        self.debouncer.cancel();
        self.search_input.clone_from(&stored.search);
        self.state = stored;
        self.revision += 1;
        log::debug!("Reloaded list state: {:?}", self.state);
        self.notify();
        true
    }

    pub fn dispatch(&mut self, event: TableEvent) {
        match event {
            TableEvent::Search(text) => self.update_search(text),
            TableEvent::Page(page) => self.update_page(page),
            TableEvent::Limit(limit) => self.update_limit(limit),
            TableEvent::Sort(field) => self.update_sort(field),
            TableEvent::Filter { key, value } => self.update_filter(key, value),
            TableEvent::ClearFilters => self.clear_filters(),
            TableEvent::Reset => self.reset(),
        }
    }

    /// Registers a callback invoked with the new state after every commit.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&QueryState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn commit_search(&mut self, search: String) -> bool {
        // The query string only carries the trimmed term.
        let search = search.trim().to_string();
        if search == self.state.search {
            return false;
        }
        self.state.search = search;
        self.state.page = 1;
        self.commit();
        true
    }

    fn commit(&mut self) {
        self.revision += 1;
        log::debug!("List state #{}: {:?}", self.revision, self.state);
        self.store.save_state(&self.state);
        self.notify();
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use super::debounce::ManualClock;
    use super::store::UrlStateStore;
    use super::*;

    fn controller() -> (TableQueryController<MemoryStateStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let controller = TableQueryController::with_store_and_clock(
            ControllerConfig::default(),
            MemoryStateStore::new(),
            clock.clone(),
        );
        (controller, clock)
    }

    fn controller_at(
        state: QueryState,
    ) -> (TableQueryController<MemoryStateStore, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let controller = TableQueryController::with_store_and_clock(
            ControllerConfig::default(),
            MemoryStateStore::with_state(state),
            clock.clone(),
        );
        (controller, clock)
    }

    fn past_debounce() -> Duration {
        ControllerConfig::default().debounce()
    }

    #[test]
    fn mounts_with_defaults() {
        let (controller, _) = controller();
        assert_eq!(controller.state(), &QueryState::new(DEFAULT_PAGE_SIZE));
        assert_eq!(controller.revision(), 0);
    }

    #[test]
    fn mounts_from_stored_state() {
        let (controller, _) = controller_at(QueryState::new(25).with_page(4).with_search("ann"));
        assert_eq!(controller.state().page, 4);
        assert_eq!(controller.state().limit, 25);
        assert_eq!(controller.search_input(), "ann");
    }

    #[test]
    fn narrowing_updates_reset_page() {
        let (mut c, clock) = controller();

        c.update_page(5);
        c.update_filter("status", "ACTIVE");
        assert_eq!(c.state().page, 1);

        c.update_page(5);
        c.update_sort("name");
        assert_eq!(c.state().page, 1);

        c.update_page(5);
        c.update_limit(50);
        assert_eq!(c.state().page, 1);
        assert_eq!(c.state().limit, 50);

        c.update_page(5);
        c.update_search("smith");
        clock.advance(past_debounce());
        assert!(c.poll());
        assert_eq!(c.state().page, 1);

        c.update_page(5);
        c.clear_filters();
        assert_eq!(c.state().page, 1);
    }

    #[test]
    fn update_page_sets_exact_page() {
        let (mut c, _) = controller_at(QueryState::new(10).with_sort("name", SortOrder::Asc));
        for page in [7, 2, 1, 400] {
            c.update_page(page);
            assert_eq!(c.state().page, page);
        }
        assert_eq!(c.state().sort(), Some(("name", SortOrder::Asc)));
    }

    #[test]
    fn update_page_zero_keeps_page_positive() {
        let (mut c, _) = controller();
        c.update_page(0);
        assert_eq!(c.state().page, 1);
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let (mut c, _) = controller();
        c.update_limit(0);
        assert_eq!(c.state().limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn sort_toggles_on_same_field() {
        let (mut c, _) = controller();

        c.update_sort("name");
        assert_eq!(c.state().sort(), Some(("name", SortOrder::Asc)));

        c.update_sort("name");
        assert_eq!(c.state().sort_by.as_deref(), Some("name"));
        assert_eq!(c.state().sort_order, Some(SortOrder::Desc));

        c.update_sort("name");
        assert_eq!(c.state().sort_order, Some(SortOrder::Asc));
    }

    #[test]
    fn sort_on_new_field_starts_ascending() {
        let (mut c, _) = controller_at(QueryState::new(10).with_sort("name", SortOrder::Desc));
        c.update_sort("createdAt");
        assert_eq!(c.state().sort(), Some(("createdAt", SortOrder::Asc)));
    }

    #[test]
    fn rapid_keystrokes_commit_once() {
        let (mut c, clock) = controller();
        let commits = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&commits);
        c.subscribe(move |state| seen.borrow_mut().push(state.search.clone()));

        c.update_search("a");
        clock.advance(Duration::from_millis(100));
        assert!(!c.poll());
        c.update_search("ab");
        assert_eq!(c.search_input(), "ab");
        assert_eq!(c.debounced_search(), "");

        clock.advance(Duration::from_millis(100));
        assert!(!c.poll());
        clock.advance(past_debounce());
        assert!(c.poll());
        assert!(!c.poll());

        assert_eq!(c.debounced_search(), "ab");
        assert_eq!(*commits.borrow(), vec!["ab".to_string()]);
    }

    #[test]
    fn unchanged_search_is_not_committed() {
        let (mut c, clock) = controller_at(QueryState::new(10).with_page(3).with_search("ab"));
        c.update_search("abc");
        c.update_search("ab");
        clock.advance(past_debounce());
        assert!(!c.poll());
        assert_eq!(c.state().page, 3);
        assert_eq!(c.revision(), 0);
    }

    #[test]
    fn flush_commits_immediately() {
        let (mut c, _) = controller();
        c.update_search("doe");
        assert_eq!(c.pending_search(), Some("doe"));
        assert!(c.flush_search());
        assert_eq!(c.debounced_search(), "doe");
        assert_eq!(c.pending_search(), None);
    }

    #[test]
    fn all_sentinel_clears_filter() {
        let (mut c, _) = controller();
        c.update_filter("status", "ACTIVE");
        c.update_filter("status", "all");
        assert!(!c.state().filters.contains_key("status"));

        c.update_filter("doctorId", "3");
        c.update_filter("doctorId", "");
        assert!(c.state().filters.is_empty());
    }

    #[test]
    fn filter_change_keeps_everything_else() {
        let (mut c, _) = controller_at(
            QueryState::new(10)
                .with_page(3)
                .with_sort("name", SortOrder::Asc)
                .with_filter("status", "ACTIVE"),
        );

        c.update_filter("status", "CANCELLED");

        let expected = QueryState {
            page: 1,
            limit: 10,
            search: String::new(),
            sort_by: Some("name".into()),
            sort_order: Some(SortOrder::Asc),
            filters: BTreeMap::from([("status".to_string(), "CANCELLED".to_string())]),
        };
        assert_eq!(c.state(), &expected);
    }

    #[test]
    fn every_commit_is_saved_and_notified() {
        let (mut c, _) = controller();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = c.subscribe(move |_| *counter.borrow_mut() += 1);

        c.dispatch(TableEvent::Page(2));
        c.dispatch(TableEvent::Sort("name".into()));
        c.dispatch(TableEvent::Filter {
            key: "gender".into(),
            value: "FEMALE".into(),
        });
        assert_eq!(*calls.borrow(), 3);
        assert_eq!(c.revision(), 3);
        assert_eq!(c.store().load_state().as_ref(), Some(c.state()));

        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        c.dispatch(TableEvent::Limit(20));
        assert_eq!(*calls.borrow(), 3);
    }

    #[test]
    fn reset_drops_pending_search() {
        let (mut c, clock) = controller_at(
            QueryState::new(30)
                .with_page(2)
                .with_filter("status", "ACTIVE"),
        );
        c.update_search("pending");
        c.dispatch(TableEvent::Reset);
        clock.advance(past_debounce());
        assert!(!c.poll());
        assert_eq!(c.state(), &QueryState::new(DEFAULT_PAGE_SIZE));
        assert_eq!(c.search_input(), "");
    }

    fn url_controller(url: &str) -> TableQueryController<UrlStateStore, ManualClock> {
        TableQueryController::with_store_and_clock(
            ControllerConfig::default(),
            UrlStateStore::from_url(url, DEFAULT_PAGE_SIZE),
            ManualClock::new(),
        )
    }

    #[test]
    fn url_store_supports_back_navigation() {
        let mut c = url_controller("/admin/appointments?status=SCHEDULED");
        assert_eq!(c.state().filter("status"), Some("SCHEDULED"));

        c.update_page(2);
        assert_eq!(
            c.store().url(),
            "/admin/appointments?page=2&size=10&status=SCHEDULED"
        );

        assert!(c.store_mut().back());
        assert!(c.reload());
        assert_eq!(c.state().page, 1);
        assert!(!c.reload());
    }

    #[test]
    fn padded_search_is_stored_as_mirrored() {
        let mut c = url_controller("/admin/patients");

        c.update_search("smith ");
        assert!(c.flush_search());
        assert_eq!(c.debounced_search(), "smith");
        assert_eq!(
            c.store().url(),
            "/admin/patients?page=1&size=10&search=smith"
        );

        assert!(!c.reload());
        assert_eq!(c.revision(), 1);
        assert_eq!(c.search_input(), "smith ");

        // Trailing whitespace alone is not a new search.
        c.update_search("smith  ");
        assert!(!c.flush_search());
        assert_eq!(c.revision(), 1);
    }

    #[test]
    fn reserved_keys_are_not_filters() {
        let mut c = url_controller("/admin/patients");

        c.update_filter("size", "3");
        c.update_filter("page", "7");
        assert!(c.state().filters.is_empty());
        assert_eq!(c.revision(), 0);

        c.update_filter("status", "ACTIVE");
        assert_eq!(
            c.store().url(),
            "/admin/patients?page=1&size=10&status=ACTIVE"
        );
        assert!(!c.reload());
        assert_eq!(c.state().limit, DEFAULT_PAGE_SIZE);
    }
}
