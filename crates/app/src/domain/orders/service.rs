//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        orders::{
            allocation::{allocate, decrement_shortage, order_total, stock_demand},
            data::{LineError, LineProblem, NewOrder, OrderUpdate},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        products::records::ProductUuid,
    },
    notifications::{NotificationDispatcher, NotificationEvent},
    pagination::{Page, PageRequest, count_to_total},
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    customers: PgCustomersRepository,
    notifications: NotificationDispatcher,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifications: NotificationDispatcher) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            customers: PgCustomersRepository::new(),
            notifications,
        }
    }

    fn notify(&self, order: &OrderRecord) {
        let event = NotificationEvent::OrderPlaced(Box::new(order.clone()));

        if let Err(error) = self.notifications.dispatch(event) {
            warn!(order = %order.uuid, error = %error, "order notification was not queued");
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        customer: CustomerUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let lines = order.validated_lines()?;

        let mut tx = self.db.begin().await?;

        self.customers
            .get_customer(&mut tx, customer)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => OrdersServiceError::CustomerNotFound,
                error => error.into(),
            })?;

        let products: Vec<ProductUuid> = lines.iter().map(|line| line.product_uuid).collect();
        let locked = self.repository.lock_products(&mut tx, &products).await?;

        let priced = allocate(&lines, &locked)?;

        for (product_uuid, quantity, index) in stock_demand(&priced) {
            if !self
                .repository
                .decrement_stock(&mut tx, product_uuid, quantity)
                .await?
            {
                return Err(decrement_shortage(&locked, product_uuid, quantity, index));
            }
        }

        let total = order_total(&priced);
        let notes = order.notes.as_deref().map(str::trim).filter(|notes| !notes.is_empty());

        self.repository
            .create_order(&mut tx, order.uuid, customer, notes, &priced, total)
            .await?;

        let placed = self.repository.get_order(&mut tx, customer, order.uuid).await?;

        tx.commit().await?;

        info!(
            order = %placed.uuid,
            customer = %customer,
            items = placed.items.len(),
            total = %placed.total_amount,
            "order placed"
        );

        self.notify(&placed);

        Ok(placed)
    }

    async fn list_orders(
        &self,
        customer: CustomerUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let (orders, total) = self.repository.list_orders(&mut tx, customer, page).await?;

        tx.commit().await?;

        Ok(Page::new(orders, count_to_total(total), page))
    }

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, customer, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn update_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let update = update.normalised();

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_order(&mut tx, customer, order, update.status, update.notes.as_deref())
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        let updated = self.repository.get_order(&mut tx, customer, order).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Places an order atomically: validates lines, reserves stock and records
    /// the order with price snapshots. Notifications are queued after commit.
    async fn place_order(
        &self,
        customer: CustomerUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// The customer's orders, newest first.
    async fn list_orders(
        &self,
        customer: CustomerUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// One of the customer's orders.
    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Changes the status and notes of one of the customer's orders.
    async fn update_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
