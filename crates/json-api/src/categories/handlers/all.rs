//! All Categories Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    categories::get::CategoryResponse,
    errors::ApiError,
    extensions::*,
    pagination::{Paginated, page_request},
    state::State,
};

/// All Categories Handler
///
/// Returns every category at any depth, in name order.
#[endpoint(
    tags("categories"),
    summary = "List All Categories",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Paginated<CategoryResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(page, page_size)?;

    let categories = state.app.categories.list_all_categories(page).await?;

    Ok(Json(Paginated::from_page(categories, req.uri().path())))
}
