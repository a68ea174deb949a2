//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::UserUuid,
    database::Db,
    domain::customers::{
        data::{CustomerUpdate, NewCustomer},
        errors::CustomersServiceError,
        records::{CustomerRecord, CustomerUuid},
        repository::PgCustomersRepository,
    },
    pagination::{Page, PageRequest, count_to_total},
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Page<CustomerRecord>, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let (customers, total) = self.repository.list_customers(&mut tx, page).await?;

        tx.commit().await?;

        Ok(Page::new(customers, count_to_total(total), page))
    }

    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn get_customer_for_user(
        &self,
        user: UserUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self
            .repository
            .find_customer_for_user(&mut tx, user)
            .await?
            .ok_or(CustomersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let customer = customer.validated()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_customer(&mut tx, &customer).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_customer(
        &self,
        user: UserUuid,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let update = update.validated()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_customer(&mut tx, user, customer, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieve a page of customer profiles, newest first.
    async fn list_customers(
        &self,
        page: PageRequest,
    ) -> Result<Page<CustomerRecord>, CustomersServiceError>;

    /// Retrieve a single customer profile.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Retrieve the profile owned by the given user.
    async fn get_customer_for_user(
        &self,
        user: UserUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Creates a profile for a user that does not have one yet.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Updates the contact details of a profile owned by `user`.
    async fn update_customer(
        &self,
        user: UserUuid,
        customer: CustomerUuid,
        update: CustomerUpdate,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}
