//! Page-addressed list queries and their response envelope.

use serde::{Deserialize, Serialize};

const DEFAULT_PER_PAGE: u64 = 20;
const MAX_PER_PAGE: u64 = 100;

/// Which page of a list to fetch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page index.
    #[serde(default = "default_page")]
    pub page: u64,
    /// Rows per page, capped at [`MAX_PER_PAGE`].
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

impl PageRequest {
    /// Build a request, clamping out-of-range values into bounds.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Row offset for the SQL query.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.per_page
    }

    /// Row limit for the SQL query.
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results plus enough bookkeeping to render pager controls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// Rows on this page.
    pub items: Vec<T>,
    /// Echo of the requested page index.
    pub page: u64,
    /// Echo of the requested page size.
    pub per_page: u64,
    /// Total matching rows.
    pub total_items: u64,
    /// Page count, never less than 1.
    pub total_pages: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Wrap `items` counted out of `total_items` matching rows.
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(request.per_page)
        };
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}
