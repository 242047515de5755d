//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::query::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    100
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Page size applied when a list request carries none.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound on the page size a client may request.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
    /// Fill the in-memory backend with demo records on startup.
    #[serde(default)]
    pub seed_demo_data: bool,
}
