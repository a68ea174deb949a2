//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    pagination::{Paginated, page_request},
    products::get::ProductResponse,
    state::State,
};

/// Product Index Handler
///
/// Returns a page of live products, newest first.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Paginated<ProductResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(page, page_size)?;

    let products = state.app.products.list_products(page).await?;

    Ok(Json(Paginated::from_page(products, req.uri().path())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        domain::products::{MockProductsService, records::ProductUuid},
        pagination::Page,
    };

    use crate::test_helpers::products_service;

    use super::{super::tests::make_product, *};

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_first_page_links_next() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|page| page.page() == 1 && page.page_size() == 1)
            .return_once(|page| {
                Ok(Page::new(
                    vec![make_product(ProductUuid::new(), "SKU-1")],
                    2,
                    page,
                ))
            });

        let mut res = TestClient::get("http://example.com/products?page_size=1")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Paginated<ProductResponse> = res.take_json().await?;

        assert_eq!(body.count, 2);
        assert_eq!(body.next.as_deref(), Some("/products?page=2&page_size=1"));
        assert_eq!(body.previous, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_oversized_page() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?page_size=101")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
