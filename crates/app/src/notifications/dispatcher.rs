//! Notification dispatcher and background worker.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::notifications::{errors::NotificationError, events::NotificationEvent};

/// A delivery route such as SMS or email.
#[automock]
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Deliver one event.
    async fn send(&self, event: &NotificationEvent) -> Result<(), NotificationError>;
}

/// Cheap handle for queueing events. Queueing never blocks.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    sender: UnboundedSender<NotificationEvent>,
}

impl NotificationDispatcher {
    /// A dispatcher and the receiving end of its queue, with no worker attached.
    #[must_use]
    pub fn channel() -> (Self, UnboundedReceiver<NotificationEvent>) {
        let (sender, receiver) = unbounded_channel();

        (Self { sender }, receiver)
    }

    /// A dispatcher whose queue is drained by a worker on the current runtime.
    #[must_use]
    pub fn spawn(channels: Vec<Arc<dyn NotificationChannel>>) -> (Self, JoinHandle<()>) {
        let (dispatcher, receiver) = Self::channel();

        let names: Vec<&str> = channels.iter().map(|channel| channel.name()).collect();

        info!(channels = ?names, "notification worker started");

        (dispatcher, tokio::spawn(run_worker(receiver, channels)))
    }

    /// Queue an event for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::QueueClosed`] once the worker has stopped.
    pub fn dispatch(&self, event: NotificationEvent) -> Result<(), NotificationError> {
        self.sender
            .send(event)
            .map_err(|_| NotificationError::QueueClosed)
    }
}

/// Drain `receiver` until every dispatcher handle is dropped.
pub async fn run_worker(
    mut receiver: UnboundedReceiver<NotificationEvent>,
    channels: Vec<Arc<dyn NotificationChannel>>,
) {
    while let Some(event) = receiver.recv().await {
        deliver(&channels, &event).await;
    }

    debug!("notification worker stopped");
}

/// Send `event` through every channel, returning how many failed.
pub async fn deliver(channels: &[Arc<dyn NotificationChannel>], event: &NotificationEvent) -> usize {
    let mut failures = 0;

    for channel in channels {
        match channel.send(event).await {
            Ok(()) => info!(
                channel = channel.name(),
                event = event.name(),
                "notification sent"
            ),
            Err(error) => {
                failures += 1;

                warn!(
                    channel = channel.name(),
                    event = event.name(),
                    error = %error,
                    "notification failed"
                );
            }
        }
    }

    failures
}
