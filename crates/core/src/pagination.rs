//! Page arithmetic and the metadata block returned with paginated listings.

use serde::Serialize;

/// Pagination details for one page of a filtered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaData {
    pub current_page: i64,
    pub page_size: i64,
    /// Rows matching the filters, ignoring pagination.
    pub total: i64,
    pub last_page: i64,
}

impl MetaData {
    pub fn new(current_page: i64, page_size: i64, total: i64) -> Self {
        Self {
            current_page,
            page_size,
            total,
            last_page: last_page(total, page_size),
        }
    }
}

/// `ceil(total / page_size)`, or 0 when there is nothing to page through.
///
/// Callers must pass a validated, positive `page_size`.
pub fn last_page(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

/// Row offset of the first record on `page` (1-based).
pub fn offset(page: i64, page_size: i64) -> i64 {
    (page - 1) * page_size
}
