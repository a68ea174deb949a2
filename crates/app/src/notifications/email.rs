//! Administrator email over SMTP.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::notifications::{
    dispatcher::NotificationChannel, errors::NotificationError, events::NotificationEvent,
};

#[derive(Clone)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,

    /// Sender mailbox, e.g. `Storefront <noreply@example.com>`.
    pub from: String,

    /// Recipient of order notifications.
    pub admin: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("from", &self.from)
            .field("admin", &self.admin)
            .finish()
    }
}

pub struct EmailChannel {
    from: Mailbox,
    admin: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailChannel {
    /// Build a STARTTLS relay channel.
    ///
    /// # Errors
    ///
    /// Returns an error when either mailbox fails to parse or the relay host is invalid.
    pub fn new(config: &EmailConfig) -> Result<Self, NotificationError> {
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            from: config.from.parse()?,
            admin: config.admin.parse()?,
            mailer,
        })
    }

    fn message(&self, event: &NotificationEvent) -> Result<Message, NotificationError> {
        Ok(Message::builder()
            .from(self.from.clone())
            .to(self.admin.clone())
            .subject(event.email_subject())
            .header(ContentType::TEXT_PLAIN)
            .body(event.email_body())?)
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn send(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        let message = self.message(event)?;

        self.mailer.send(message).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::notifications::events::tests::placed_order;

    use super::*;

    fn config(admin: &str) -> EmailConfig {
        EmailConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer".to_string(),
            password: "secret".to_string(),
            from: "Storefront <noreply@example.com>".to_string(),
            admin: admin.to_string(),
        }
    }

    #[tokio::test]
    async fn message_is_addressed_to_admin() -> TestResult {
        let channel = EmailChannel::new(&config("admin@example.com"))?;

        let message = channel.message(&placed_order())?;
        let formatted = String::from_utf8(message.formatted())?;

        assert!(formatted.contains("To: admin@example.com"), "{formatted}");
        assert!(
            formatted.contains("Subject: New Order Placed - Order #"),
            "{formatted}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_admin_mailbox_is_rejected() {
        let result = EmailChannel::new(&config("not an address"));

        assert!(
            matches!(result, Err(NotificationError::Address(_))),
            "expected Address error"
        );
    }

    #[test]
    fn debug_redacts_password() {
        let rendered = format!("{:?}", config("admin@example.com"));

        assert!(!rendered.contains("secret"), "{rendered}");
    }
}
