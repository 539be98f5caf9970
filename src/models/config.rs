//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::PAGE_SIZE;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Scheme and host used when generating absolute URLs.
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_page_size() -> usize {
    PAGE_SIZE
}
