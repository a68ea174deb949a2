//! Notification events and their rendered messages.

use std::fmt::Write as _;

use crate::domain::orders::records::OrderRecord;

/// Something customers or staff should hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    OrderPlaced(Box<OrderRecord>),
}

impl NotificationEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderPlaced(_) => "order_placed",
        }
    }

    /// Short text message for the customer.
    #[must_use]
    pub fn sms_text(&self) -> String {
        match self {
            Self::OrderPlaced(order) => format!(
                "Hi {}, your order #{} for ${} has been placed successfully. \
                 Thank you for shopping with us!",
                order.customer_name, order.uuid, order.total_amount
            ),
        }
    }

    /// Subject line for the administrator email.
    #[must_use]
    pub fn email_subject(&self) -> String {
        match self {
            Self::OrderPlaced(order) => format!("New Order Placed - Order #{}", order.uuid),
        }
    }

    /// Plain-text body for the administrator email.
    #[must_use]
    pub fn email_body(&self) -> String {
        match self {
            Self::OrderPlaced(order) => {
                let mut items = String::new();

                for item in &order.items {
                    let _ = writeln!(
                        items,
                        "- {} x {} @ ${} = ${}",
                        item.product_name, item.quantity, item.unit_price, item.subtotal
                    );
                }

                format!(
                    "A new order has been placed:\n\n\
                     Order ID: #{}\n\
                     Customer: {} ({})\n\
                     Customer Phone: {}\n\
                     Status: {}\n\
                     Total Amount: ${}\n\
                     Order Date: {}\n\n\
                     Items:\n{}\n\
                     Notes: {}\n",
                    order.uuid,
                    order.customer_name,
                    order.customer_email,
                    order.customer_phone,
                    order.status,
                    order.total_amount,
                    order.created_at.strftime("%Y-%m-%d %H:%M:%S"),
                    items,
                    order.notes.as_deref().unwrap_or("None"),
                )
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::str::FromStr;

    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use crate::domain::{
        customers::records::CustomerUuid,
        orders::records::{OrderItemRecord, OrderItemUuid, OrderStatus, OrderUuid},
        products::records::ProductUuid,
    };

    use super::*;

    pub(crate) fn placed_order() -> NotificationEvent {
        let uuid = OrderUuid::new();
        let price = Decimal::from_str("19.99").unwrap_or_default();

        NotificationEvent::OrderPlaced(Box::new(OrderRecord {
            uuid,
            customer_uuid: CustomerUuid::new(),
            customer_name: "Jane Doe".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_phone: "+254700000001".to_string(),
            status: OrderStatus::Pending,
            total_amount: price * Decimal::from(2),
            notes: None,
            items: vec![OrderItemRecord {
                uuid: OrderItemUuid::new(),
                order_uuid: uuid,
                product_uuid: ProductUuid::new(),
                product_name: "Sourdough".to_string(),
                position: 1,
                quantity: 2,
                unit_price: price,
                subtotal: price * Decimal::from(2),
            }],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }))
    }

    #[test]
    fn sms_text_greets_customer_with_total() {
        let text = placed_order().sms_text();

        assert!(text.starts_with("Hi Jane Doe, your order #"), "{text}");
        assert!(text.contains("for $39.98"), "{text}");
    }

    #[test]
    fn email_body_lists_items_and_defaults_notes() {
        let body = placed_order().email_body();

        assert!(
            body.contains("- Sourdough x 2 @ $19.99 = $39.98"),
            "{body}"
        );
        assert!(body.contains("Customer: Jane Doe (jane@example.com)"), "{body}");
        assert!(body.contains("Status: pending"), "{body}");
        assert!(body.contains("Order Date: 1970-01-01 00:00:00"), "{body}");
        assert!(body.ends_with("Notes: None\n"), "{body}");
    }
}
