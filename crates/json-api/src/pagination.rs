//! Pagination envelope for list endpoints.

use salvo::oapi::{ToSchema, extract::QueryParam};
use serde::{Deserialize, Serialize};

use storefront_app::pagination::{Page, PageRequest};

use crate::errors::ApiError;

/// Paginated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct Paginated<T: ToSchema + 'static> {
    /// Total number of results across every page
    pub count: u64,

    /// Relative URL of the next page
    pub next: Option<String>,

    /// Relative URL of the previous page
    pub previous: Option<String>,

    /// Results on this page
    pub results: Vec<T>,
}

impl<T: ToSchema + 'static> Paginated<T> {
    /// Wrap a page of records, linking neighbours relative to `path`.
    pub(crate) fn from_page<R>(page: Page<R>, path: &str) -> Self
    where
        R: Into<T>,
    {
        let request = page.request;

        let link = |number: u32| format!("{path}?page={number}&page_size={}", request.page_size());

        Self {
            count: page.total,
            next: page.has_next().then(|| link(request.page() + 1)),
            previous: page.has_previous().then(|| link(request.page() - 1)),
            results: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse the `page` and `page_size` query parameters.
pub(crate) fn page_request(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
) -> Result<PageRequest, ApiError> {
    PageRequest::new(page.into_inner(), page_size.into_inner())
        .map_err(|error| ApiError::bad_request(error.to_string()))
}
