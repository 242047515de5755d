//! A list view wired to its backend.
//!
//! [`ListingSession`] pairs a [`TableQueryController`] with a repository and
//! refetches whenever the controller has committed a state the session has
//! not fetched yet. Superseded states are never fetched: only the latest
//! revision is requested.

use crate::controller::debounce::{Clock, SystemClock};
use crate::controller::store::{MemoryStateStore, StateStore};
use crate::controller::{TableEvent, TableQueryController};
use crate::domain::Record;
use crate::domain::paginated::PaginatedResult;
use crate::pagination::PaginationView;
use crate::repository::RecordReader;
use crate::services::ServiceResult;
use crate::services::records::list_records;

pub struct ListingSession<'a, T, R: ?Sized, S = MemoryStateStore, C = SystemClock> {
    repo: &'a R,
    controller: TableQueryController<S, C>,
    result: Option<PaginatedResult<T>>,
    fetched_revision: Option<u64>,
}

impl<'a, T, R, S, C> ListingSession<'a, T, R, S, C>
where
    T: Record,
    R: RecordReader<T> + ?Sized,
    S: StateStore,
    C: Clock,
{
    pub fn new(repo: &'a R, controller: TableQueryController<S, C>) -> Self {
        Self {
            repo,
            controller,
            result: None,
            fetched_revision: None,
        }
    }

    pub fn controller(&self) -> &TableQueryController<S, C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TableQueryController<S, C> {
        &mut self.controller
    }

    /// Last fetched page, `None` before the first fetch.
    pub fn result(&self) -> Option<&PaginatedResult<T>> {
        self.result.as_ref()
    }

    pub fn pagination(&self) -> Option<PaginationView> {
        self.result
            .as_ref()
            .map(|result| PaginationView::new(result, self.controller.state().limit))
    }

    /// Applies a widget event and refetches if it committed a new state.
    ///
    /// Returns `true` when a fetch was issued.
    pub fn dispatch(&mut self, event: TableEvent) -> ServiceResult<bool> {
        self.controller.dispatch(event);
        self.refresh()
    }

    /// Drives the search debounce; refetches once a search is committed.
    pub fn poll(&mut self) -> ServiceResult<bool> {
        self.controller.poll();
        self.refresh()
    }

    /// Fetches the current state unless it has been fetched already.
    pub fn refresh(&mut self) -> ServiceResult<bool> {
        let revision = self.controller.revision();
        if self.fetched_revision == Some(revision) {
            return Ok(false);
        }
        self.fetch()?;
        self.fetched_revision = Some(revision);
        Ok(true)
    }

    /// Fetches the current state unconditionally, e.g. after a create or delete.
    pub fn reload(&mut self) -> ServiceResult<()> {
        self.fetch()?;
        self.fetched_revision = Some(self.controller.revision());
        Ok(())
    }

    fn fetch(&mut self) -> ServiceResult<()> {
        let result = list_records(self.repo, self.controller.state())?;
        self.result = Some(result);
        Ok(())
    }
}
