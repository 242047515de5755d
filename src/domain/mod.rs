//! Domain records listed by the hospital dashboard and the query types that
//! describe a list view.

use std::fmt::{Debug, Display};

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::types::TypeConstraintError;

pub mod appointment;
pub mod medicine;
pub mod paginated;
pub mod patient;
pub mod query;
pub mod types;

/// Comparable value extracted from a record for a sortable column.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Int(i64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl SortKey {
    /// Case-insensitive text key.
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_lowercase())
    }
}

/// A record that a list view can search, filter and sort.
///
/// Implementations only describe how their own fields match; paging and the
/// ordering of the operations belong to the repository.
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Copy
        + Eq
        + Debug
        + Display
        + Into<i32>
        + TryFrom<i32, Error = TypeConstraintError>
        + Send
        + Sync
        + 'static;
    /// Payload used to create a record.
    type New: Send;
    /// Payload used to replace the editable fields of a record.
    type Update: Send;

    /// Singular name used in log lines.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    fn from_new(id: Self::Id, new: Self::New, now: NaiveDateTime) -> Self;

    fn apply_update(&mut self, update: Self::Update, now: NaiveDateTime);

    /// `term` is already trimmed and lower-cased.
    fn matches_search(&self, term: &str) -> bool;

    /// Returns `true` for filter keys the record does not know.
    fn matches_filter(&self, key: &str, value: &str) -> bool;

    /// `None` when `field` is not a sortable column.
    fn sort_key(&self, field: &str) -> Option<SortKey>;
}

/// Case-insensitive substring match; `term` must already be lower-cased.
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

/// Compares an id-valued filter against a raw id.
pub(crate) fn id_matches(id: i32, value: &str) -> bool {
    match value.trim().parse::<i32>() {
        Ok(expected) => expected == id,
        Err(_) => {
            log::debug!("Ignoring non-numeric id filter value `{value}`");
            false
        }
    }
}

/// Parses a `YYYY-MM-DD` filter bound.
pub(crate) fn parse_date_bound(value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            log::debug!("Ignoring malformed date bound `{value}`: {err}");
            None
        }
    }
}
