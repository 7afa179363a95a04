//! Offset pagination request and response metadata.

use serde::{Deserialize, Serialize};

/// A requested page of results (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// Page used when the client does not ask for one.
    pub const DEFAULT_PAGE: i64 = 1;
    /// Page size used when the client does not ask for one.
    pub const DEFAULT_SIZE: i64 = 10;
    /// Largest page size a client may request.
    pub const MAX_SIZE: i64 = 100;

    /// Build a page request, falling back to the defaults for missing values.
    ///
    /// Bounds are not checked here; validate the raw query first.
    #[must_use]
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(Self::DEFAULT_PAGE),
            size: size.unwrap_or(Self::DEFAULT_SIZE),
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    /// The number of items per page.
    #[must_use]
    pub const fn size(&self) -> i64 {
        self.size
    }

    /// Number of rows to skip (`OFFSET`).
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Build the paging metadata for a result set of `total_item` rows.
    #[must_use]
    pub fn paging(&self, total_item: i64) -> Paging {
        Paging::new(self.page, self.size, total_item)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Paging metadata returned alongside a page of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// The page that was returned.
    pub page: i64,
    /// Total number of pages, `ceil(total_item / size)`.
    pub total_page: i64,
    /// Total number of matching items across all pages.
    pub total_item: i64,
}

impl Paging {
    /// Compute paging metadata.
    ///
    /// A non-positive `size` yields zero pages instead of dividing by zero.
    #[must_use]
    pub fn new(page: i64, size: i64, total_item: i64) -> Self {
        let total_page = if size > 0 && total_item > 0 {
            (total_item + size - 1) / size
        } else {
            0
        };

        Self {
            page,
            total_page,
            total_item,
        }
    }
}
