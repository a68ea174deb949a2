//! Notification channel wiring.

use std::sync::Arc;

use tracing::{info, warn};

use storefront_app::notifications::{EmailChannel, NotificationChannel, SmsChannel};

use crate::{config::notifications::NotificationsConfig, observability::CountingChannel};

/// Channels with complete credentials, each counting its own failures.
///
/// A channel that is not configured is skipped; orders are still placed.
pub(crate) fn channels(config: &NotificationsConfig) -> Vec<Arc<dyn NotificationChannel>> {
    let mut channels: Vec<Arc<dyn NotificationChannel>> = Vec::new();

    match config.sms() {
        Some(sms) => channels.push(CountingChannel::wrap(Arc::new(SmsChannel::new(sms)))),
        None => info!("sms notifications disabled: SMS_USERNAME or SMS_API_KEY not set"),
    }

    match config.email().map(|email| EmailChannel::new(&email)) {
        Some(Ok(email)) => channels.push(CountingChannel::wrap(Arc::new(email))),
        Some(Err(error)) => warn!(%error, "email notifications disabled: invalid smtp settings"),
        None => info!("email notifications disabled: smtp settings incomplete"),
    }

    channels
}
