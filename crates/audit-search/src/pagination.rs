//! Offset/limit paging for listings.

use serde::Serialize;

use audit_config::GeneralConfig;
use audit_core::query::{Page, Paged, QueryParams};

/// A listing response: one page of items plus the filtered total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing<T> {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub items: Vec<T>,
}

impl<T> Listing<T> {
    #[must_use]
    pub fn new(paged: Paged<T>, page: Page) -> Self {
        Self {
            total: paged.total,
            limit: page.limit,
            offset: page.offset,
            items: paged.items,
        }
    }
}

/// Read `limit`/`offset` from the query surface.
///
/// A missing or zero `limit` uses the configured default; larger requests are
/// capped at the configured maximum.
#[must_use]
pub fn page_from_params(params: &QueryParams, general: &GeneralConfig) -> Page {
    Page::new(
        params.get_u32("offset").unwrap_or(0),
        general.effective_limit(params.get_u32("limit")),
    )
}
