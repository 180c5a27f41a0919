//! Query-string pagination parameters.

use serde::{Deserialize, Serialize};

use beyondtrips_core::types::pagination::PageRequest;

/// `?page=&per_page=` parameters accepted by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// 1-based page index; defaults to the first page.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Rows per page; defaults to 20, capped at 100.
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    20
}

impl PaginationParams {
    /// Clamp into a [`PageRequest`] the repositories accept.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page, self.per_page)
    }
}
