//! Persistence strategies for a controller's query state.

use crate::controller::params::{parse_query_string, to_query_string};
use crate::domain::query::QueryState;

/// Where a list view keeps its state between renders.
pub trait StateStore {
    /// Returns the stored state, `None` when nothing usable is stored.
    fn load_state(&self) -> Option<QueryState>;

    fn save_state(&mut self, state: &QueryState);
}

/// Keeps the last saved state in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStateStore {
    state: Option<QueryState>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `state`, as if the view had been opened before.
    pub fn with_state(state: QueryState) -> Self {
        Self { state: Some(state) }
    }
}

impl StateStore for MemoryStateStore {
    fn load_state(&self) -> Option<QueryState> {
        self.state.clone()
    }

    fn save_state(&mut self, state: &QueryState) {
        self.state = Some(state.clone());
    }
}

/// Mirrors the state into the query string of a page URL.
///
/// Every distinct saved query becomes a history entry; [`back`](Self::back)
/// and [`forward`](Self::forward) move through them like browser navigation.
/// Saving after going back discards the forward entries.
#[derive(Clone, Debug)]
pub struct UrlStateStore {
    path: String,
    history: Vec<String>,
    cursor: usize,
    default_limit: usize,
}

impl UrlStateStore {
    /// Opens the store on `url`, ignoring any `#fragment`.
    pub fn from_url(url: &str, default_limit: usize) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        Self {
            path: path.to_string(),
            history: vec![query.to_string()],
            cursor: 0,
            default_limit,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string of the current history entry, without `?`.
    pub fn query(&self) -> &str {
        &self.history[self.cursor]
    }

    pub fn url(&self) -> String {
        if self.query().is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query())
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Moves one entry back; `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves one entry forward; `false` at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.history.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl StateStore for UrlStateStore {
    fn load_state(&self) -> Option<QueryState> {
        match parse_query_string(self.query(), self.default_limit) {
            Ok(state) => Some(state),
            Err(err) => {
                log::warn!("Ignoring unreadable URL state `{}`: {err}", self.query());
                None
            }
        }
    }

    fn save_state(&mut self, state: &QueryState) {
        let query = match to_query_string(state) {
            Ok(query) => query,
            Err(err) => {
                log::error!("Failed to mirror list state into the URL: {err}");
                return;
            }
        };

        if query == self.query() {
            return;
        }

        self.history.truncate(self.cursor + 1);
        self.history.push(query);
        self.cursor = self.history.len() - 1;
    }
}
