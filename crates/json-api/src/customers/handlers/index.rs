//! Customer Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    customers::get::CustomerResponse,
    errors::ApiError,
    extensions::*,
    pagination::{Paginated, page_request},
    state::State,
};

/// Customer Index Handler
///
/// Returns a page of customer profiles, newest first.
#[endpoint(
    tags("customers"),
    summary = "List Customers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    page_size: QueryParam<u32, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Paginated<CustomerResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let page = page_request(page, page_size)?;

    let customers = state.app.customers.list_customers(page).await?;

    Ok(Json(Paginated::from_page(customers, req.uri().path())))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        domain::customers::{MockCustomersService, records::CustomerUuid},
        pagination::Page,
    };

    use crate::test_helpers::{TEST_USER_UUID, customers_service};

    use super::{super::tests::make_customer, *};

    fn make_service(customers: MockCustomersService) -> Service {
        customers_service(customers, Router::with_path("customers").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_pagination_envelope() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_list_customers()
            .once()
            .withf(|page| page.page() == 1 && page.page_size() == 1)
            .return_once(move |page| {
                Ok(Page::new(vec![make_customer(uuid, TEST_USER_UUID)], 2, page))
            });

        let mut res = TestClient::get("http://example.com/customers?page_size=1")
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Paginated<CustomerResponse> = res.take_json().await?;

        assert_eq!(body.count, 2);
        assert_eq!(body.next.as_deref(), Some("/customers?page=2&page_size=1"));
        assert_eq!(body.previous, None);
        assert_eq!(body.results.len(), 1, "expected one customer");

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_page_size_returns_400() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers.expect_list_customers().never();

        let res = TestClient::get("http://example.com/customers?page_size=500")
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_page_zero_returns_400() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers.expect_list_customers().never();

        let res = TestClient::get("http://example.com/customers?page=0")
            .send(&make_service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));


        Ok(())
    }
}
