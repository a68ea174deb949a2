//! Failure counting for notification channels.

use std::sync::Arc;

use async_trait::async_trait;

use storefront_app::notifications::{NotificationChannel, NotificationError, NotificationEvent};

use super::metrics::record_notification_failure;

/// Wraps a channel and counts its delivery failures.
pub(crate) struct CountingChannel {
    inner: Arc<dyn NotificationChannel>,
}

impl CountingChannel {
    pub(crate) fn wrap(inner: Arc<dyn NotificationChannel>) -> Arc<dyn NotificationChannel> {
        Arc::new(Self { inner })
    }
}

impl std::fmt::Debug for CountingChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountingChannel")
            .field("channel", &self.inner.name())
            .finish()
    }
}

#[async_trait]
impl NotificationChannel for CountingChannel {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn send(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        let result = self.inner.send(event).await;

        if result.is_err() {
            record_notification_failure(self.inner.name());
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use storefront_app::{
        domain::{
            customers::records::CustomerUuid,
            orders::records::{OrderRecord, OrderStatus, OrderUuid},
        },
        notifications::MockNotificationChannel,
    };

    use super::*;

    fn order_placed() -> NotificationEvent {
        NotificationEvent::OrderPlaced(Box::new(OrderRecord {
            uuid: OrderUuid::new(),
            customer_uuid: CustomerUuid::new(),
            customer_name: "Jane Wanjiru".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_phone: "+254712345678".to_string(),
            status: OrderStatus::Pending,
            total_amount: Decimal::new(70_000, 2),
            notes: None,
            items: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }))
    }

    #[tokio::test]
    async fn failures_pass_through_unchanged() {
        let mut inner = MockNotificationChannel::new();

        inner.expect_name().return_const("sms");
        inner.expect_send().once().returning(|_| {
            Err(NotificationError::UnexpectedResponse(
                "gateway down".to_string(),
            ))
        });

        let channel = CountingChannel::wrap(Arc::new(inner));

        let result = channel.send(&order_placed()).await;

        assert_eq!(channel.name(), "sms");
        assert!(
            matches!(result, Err(NotificationError::UnexpectedResponse(_))),
            "expected the inner error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn successful_delivery_is_forwarded() {
        let mut inner = MockNotificationChannel::new();

        inner.expect_name().return_const("email");
        inner.expect_send().once().returning(|_| Ok(()));

        let channel = CountingChannel::wrap(Arc::new(inner));

        assert!(
            channel.send(&order_placed()).await.is_ok(),
            "expected delivery to succeed"
        );
    }
}
