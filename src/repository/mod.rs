//! Backend contract consumed by the list views.
//!
//! Any backend that can answer a [`QueryState`] with a [`PaginatedResult`]
//! plugs in here; [`memory::InMemoryRepository`] is the bundled one.

use crate::domain::Record;
use crate::domain::paginated::PaginatedResult;
use crate::domain::query::QueryState;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use memory::InMemoryRepository;

pub trait RecordReader<T: Record> {
    fn get_by_id(&self, id: T::Id) -> RepositoryResult<Option<T>>;
    /// Applies search, filters and sort of `query`, then returns the requested page.
    fn list(&self, query: &QueryState) -> RepositoryResult<PaginatedResult<T>>;
}

pub trait RecordWriter<T: Record> {
    fn create(&self, new: T::New) -> RepositoryResult<T>;
    fn update(&self, id: T::Id, update: T::Update) -> RepositoryResult<T>;
    fn delete(&self, id: T::Id) -> RepositoryResult<()>;
}
