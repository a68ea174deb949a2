//! Customers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::{
    auth::UserUuid,
    domain::customers::{
        data::{CustomerUpdate, NewCustomer},
        records::{CustomerRecord, CustomerUuid},
    },
    pagination::PageRequest,
};

const LIST_CUSTOMERS_SQL: &str = include_str!("sql/list_customers.sql");
const COUNT_CUSTOMERS_SQL: &str = include_str!("sql/count_customers.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const FIND_CUSTOMER_FOR_USER_SQL: &str = include_str!("sql/find_customer_for_user.sql");
const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const UPDATE_CUSTOMER_SQL: &str = include_str!("sql/update_customer.sql");
const UPDATE_CONTACT_DETAILS_SQL: &str = include_str!("sql/update_contact_details.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        page: PageRequest,
    ) -> Result<(Vec<CustomerRecord>, i64), sqlx::Error> {
        let customers = query_as::<Postgres, CustomerRecord>(LIST_CUSTOMERS_SQL)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&mut **tx)
            .await?;

        let total: i64 = query_scalar(COUNT_CUSTOMERS_SQL)
            .fetch_one(&mut **tx)
            .await?;

        Ok((customers, total))
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_customer_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(FIND_CUSTOMER_FOR_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: &NewCustomer,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(CREATE_CUSTOMER_SQL)
            .bind(customer.uuid.into_uuid())
            .bind(customer.user_uuid.into_uuid())
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.phone)
            .fetch_one(&mut **tx)
            .await
    }

    /// Update a profile owned by `user`; profiles of other users are not found.
    pub(crate) async fn update_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        customer: CustomerUuid,
        update: &CustomerUpdate,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(UPDATE_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .bind(user.into_uuid())
            .bind(&update.name)
            .bind(&update.email)
            .bind(&update.phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_contact_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        name: &str,
        phone: &str,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(UPDATE_CONTACT_DETAILS_SQL)
            .bind(customer.into_uuid())
            .bind(name)
            .bind(phone)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
