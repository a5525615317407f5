//! Pagination query parameters and paging metadata.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Query string for `GET coupons`.
///
/// `coupon_code` is left out of the query string entirely when absent.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub limit: u32,
    pub offset: u64,
    pub coupon_code: Option<String>,
}

impl ListQuery {
    /// Builds the query for a 1-indexed page.
    ///
    /// An empty search term is treated as no filter.
    ///
    /// # Returns
    ///
    /// `offset = (page - 1) * page_size`, `limit = page_size`.
    pub fn for_page(page: u32, page_size: u32, search_term: &str) -> Self {
        let offset = u64::from(page.saturating_sub(1)) * u64::from(page_size);
        let term = search_term.trim();

        Self {
            limit: page_size,
            offset,
            coupon_code: (!term.is_empty()).then(|| term.to_string()),
        }
    }
}

/// Paging metadata returned alongside a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Paging {
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
}
