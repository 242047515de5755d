//! Pagination widget model derived from a fetched page.

use serde::Serialize;

use crate::domain::paginated::PaginatedResult;

/// Pages always linked at both ends of the pager.
const EDGE_PAGES: usize = 2;
/// Pages linked on each side of the current one.
const AROUND_CURRENT: usize = 2;

/// Page links to render; `None` marks a gap ("…").
fn page_links(
    total_pages: usize,
    current: usize,
    edge: usize,
    around: usize,
) -> Vec<Option<usize>> {
    let mut links = Vec::new();
    let mut last_linked = 0;

    for page in 1..=total_pages {
        let near_edge = page <= edge || page + edge > total_pages;
        let near_current = page.abs_diff(current) <= around;
        if !(near_edge || near_current) {
            continue;
        }
        if page > last_linked + 1 {
            links.push(None);
        }
        links.push(Some(page));
        last_linked = page;
    }

    links
}

/// Clamps a requested page into `[1, total_pages]`.
///
/// An empty result still has page 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Everything the pager and the "showing x–y of z" caption need.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub page: usize,
    pub total_pages: usize,
    pub total_elements: usize,
    /// Rows per page.
    pub limit: usize,
    pub pages: Vec<Option<usize>>,
    pub has_previous: bool,
    pub has_next: bool,
    /// 1-based index of the first row shown, 0 when the page is empty.
    pub first_item: usize,
    pub last_item: usize,
}

impl PaginationView {
    pub fn new<T>(result: &PaginatedResult<T>, limit: usize) -> Self {
        let page = result.page.max(1);
        let shown = result.content.len();
        let (first_item, last_item) = if shown == 0 {
            (0, 0)
        } else {
            let first = (page - 1) * limit + 1;
            (first, first + shown - 1)
        };

        Self {
            page,
            total_pages: result.total_pages,
            total_elements: result.total_elements,
            limit,
            pages: page_links(result.total_pages, page, EDGE_PAGES, AROUND_CURRENT),
            has_previous: page > 1,
            has_next: page < result.total_pages,
            first_item,
            last_item,
        }
    }
}
