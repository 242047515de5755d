use serde::{Deserialize, Serialize};

/// One page of records plus total-count metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub content: Vec<T>,
    /// Page the content belongs to, 1-indexed.
    pub page: usize,
    pub total_pages: usize,
    pub total_elements: usize,
}

impl<T> PaginatedResult<T> {
    /// Builds a page, deriving `total_pages` from the page size.
    pub fn new(content: Vec<T>, page: usize, limit: usize, total_elements: usize) -> Self {
        Self {
            content,
            page: page.max(1),
            total_pages: total_elements.div_ceil(limit.max(1)),
            total_elements,
        }
    }

    pub fn empty(page: usize) -> Self {
        Self {
            content: Vec::new(),
            page: page.max(1),
            total_pages: 0,
            total_elements: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
