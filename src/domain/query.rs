//! Query parameters describing which slice of a list view to fetch.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Page size used when neither the URL nor the configuration provide one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter value that the filter widgets use for "no filter".
pub const ALL_FILTER_VALUE: &str = "all";

/// Direction of a column sort.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns the opposite direction.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("asc") => Ok(Self::Asc),
            v if v.eq_ignore_ascii_case("desc") => Ok(Self::Desc),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Returns `true` when a filter value means "do not filter".
///
/// Empty strings and the `all` sentinel clear the filter key instead of being
/// sent to the backend.
pub fn is_cleared_filter_value(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL_FILTER_VALUE)
}

/// Canonical query state of one list view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    /// Current page, 1-indexed.
    pub page: usize,
    /// Page size, always greater than zero.
    pub limit: usize,
    /// Committed (debounced) free-text search.
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: Option<SortOrder>,
    /// Named filter values such as `status` or `doctorId`.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    /// First page of an unfiltered, unsorted list.
    pub fn new(limit: usize) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: String::new(),
            sort_by: None,
            sort_order: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Number of rows preceding the current page.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Trimmed search term, `None` when the search box is blank.
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// Active sort field and direction.
    pub fn sort(&self) -> Option<(&str, SortOrder)> {
        self.sort_by
            .as_deref()
            .map(|field| (field, self.sort_order.unwrap_or_default()))
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Restores the invariants of a state coming from an untrusted source.
    ///
    /// `page` becomes at least 1 and the search is trimmed. A zero `limit`
    /// falls back to `default_limit`. The sort order is present exactly when
    /// a sort field is, and cleared filter values are dropped.
    pub fn normalized(mut self, default_limit: usize) -> Self {
        self.page = self.page.max(1);
        self.search = self.search.trim().to_string();
        if self.limit == 0 {
            self.limit = default_limit.max(1);
        }
        self.sort_by = self
            .sort_by
            .map(|field| field.trim().to_string())
            .filter(|field| !field.is_empty());
        self.sort_order = match self.sort_by {
            Some(_) => Some(self.sort_order.unwrap_or_default()),
            None => None,
        };
        self.filters.retain(|_, value| !is_cleared_filter_value(value));
        self
    }
}
