//! Query-string codec for [`QueryState`].
//!
//! Layout: `page={page}&size={limit}&search={search}&sort={field},{order}`
//! followed by one `key=value` pair per filter. `search` and `sort` are only
//! emitted when set, filters are emitted in key order. Parsing is lenient:
//! malformed numbers fall back to defaults instead of failing.

use thiserror::Error;

use crate::domain::query::{QueryState, SortOrder, is_cleared_filter_value};

pub const PAGE_PARAM: &str = "page";
pub const SIZE_PARAM: &str = "size";
pub const SEARCH_PARAM: &str = "search";
pub const SORT_PARAM: &str = "sort";

/// Keys that can never be used as filter names.
pub const RESERVED_PARAMS: [&str; 4] = [PAGE_PARAM, SIZE_PARAM, SEARCH_PARAM, SORT_PARAM];

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to encode query string: {0}")]
    Encode(String),

    #[error("failed to decode query string: {0}")]
    Decode(String),
}

/// Ordered `(key, value)` pairs for a request query string.
pub fn to_query_pairs(state: &QueryState) -> Vec<(String, String)> {
    let mut pairs = vec![
        (PAGE_PARAM.to_string(), state.page.to_string()),
        (SIZE_PARAM.to_string(), state.limit.to_string()),
    ];

    if let Some(term) = state.search_term() {
        pairs.push((SEARCH_PARAM.to_string(), term.to_string()));
    }

    if let Some((field, order)) = state.sort() {
        pairs.push((SORT_PARAM.to_string(), format!("{field},{order}")));
    }

    pairs.extend(
        state
            .filters
            .iter()
            .filter(|(key, value)| {
                !RESERVED_PARAMS.contains(&key.as_str()) && !is_cleared_filter_value(value)
            })
            .map(|(key, value)| (key.clone(), value.clone())),
    );

    pairs
}

/// Serializes the state into a URL-encoded query string without a leading `?`.
pub fn to_query_string(state: &QueryState) -> Result<String, ParamsError> {
    serde_html_form::to_string(to_query_pairs(state))
        .map_err(|err| ParamsError::Encode(err.to_string()))
}

/// Parses a query string (with or without a leading `?`) into a normalized state.
pub fn parse_query_string(query: &str, default_limit: usize) -> Result<QueryState, ParamsError> {
    let query = query.trim_start_matches('?');
    let pairs: Vec<(String, String)> =
        serde_html_form::from_str(query).map_err(|err| ParamsError::Decode(err.to_string()))?;

    let mut state = QueryState::new(default_limit);

    for (key, value) in pairs {
        match key.as_str() {
            PAGE_PARAM => match value.trim().parse::<usize>() {
                Ok(page) => state.page = page,
                Err(_) => log::warn!("Ignoring malformed page `{value}`"),
            },
            SIZE_PARAM => match value.trim().parse::<usize>() {
                Ok(limit) => state.limit = limit,
                Err(_) => log::warn!("Ignoring malformed page size `{value}`"),
            },
            SEARCH_PARAM => state.search = value,
            SORT_PARAM => {
                let (field, order) = match value.split_once(',') {
                    Some((field, order)) => (field, order.parse::<SortOrder>().unwrap_or_default()),
                    None => (value.as_str(), SortOrder::Asc),
                };
                state.sort_by = Some(field.to_string());
                state.sort_order = Some(order);
            }
            _ => {
                state.filters.insert(key, value);
            }
        }
    }

    Ok(state.normalized(default_limit))
}
