//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        categories::repository::PgCategoriesRepository,
        products::{
            data::{CategoryTarget, NewProduct, ProductUpdate},
            errors::ProductsServiceError,
            records::{BulkItemError, BulkOutcome, ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
    pagination::{Page, PageRequest, count_to_total},
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    categories: PgCategoriesRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            categories: PgCategoriesRepository::new(),
        }
    }

    /// Resolve the category and insert the product in one transaction.
    async fn insert_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let product = product.validated()?;

        let mut tx = self.db.begin().await?;

        let category = match &product.category {
            CategoryTarget::Existing(category) => *category,
            CategoryTarget::Path(path) => self.categories.resolve_path(&mut tx, path).await?.uuid,
        };

        let created = self
            .repository
            .create_product(&mut tx, &product, category)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let (products, total) = self.repository.list_products(&mut tx, page).await?;

        tx.commit().await?;

        Ok(Page::new(products, count_to_total(total), page))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        self.insert_product(product).await
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let update = update.validated()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn bulk_create(&self, products: Vec<NewProduct>) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();

        for (index, product) in products.into_iter().enumerate() {
            let sku = product.sku.clone();

            match self.insert_product(product).await {
                Ok(created) => outcome.created.push(created),
                Err(error) => {
                    warn!(index, sku = %sku, error = %error, "bulk upload item rejected");

                    outcome.errors.push(BulkItemError {
                        index,
                        sku,
                        error: error.to_string(),
                    });
                }
            }
        }

        info!(
            created = outcome.created.len(),
            failed = outcome.errors.len(),
            "bulk upload finished"
        );

        outcome
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves a page of live products.
    async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single live product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product in an existing category or one resolved from a path.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the details of a live product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product. Order history keeps referencing it.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Creates each product in its own transaction, collecting per-item failures.
    async fn bulk_create(&self, products: Vec<NewProduct>) -> BulkOutcome;
}
