//! Notifications Config

use clap::Args;

use storefront_app::notifications::{DEFAULT_SMS_API_URL, EmailConfig, SmsConfig};

/// SMS gateway and SMTP relay settings.
///
/// A channel is only enabled when all of its credentials are present.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Africa's Talking messaging endpoint
    #[arg(long, env = "SMS_API_URL", default_value = DEFAULT_SMS_API_URL)]
    pub sms_api_url: String,

    /// Africa's Talking username
    #[arg(long, env = "SMS_USERNAME")]
    pub sms_username: Option<String>,

    /// Africa's Talking API key
    #[arg(long, env = "SMS_API_KEY", hide_env_values = true)]
    pub sms_api_key: Option<String>,

    /// SMTP relay host
    #[arg(long, env = "SMTP_HOST")]
    pub smtp_host: Option<String>,

    /// SMTP relay port
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP username
    #[arg(long, env = "SMTP_USERNAME")]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Sender address of notification emails
    #[arg(long, env = "DEFAULT_FROM_EMAIL")]
    pub default_from_email: Option<String>,

    /// Recipient of order notification emails
    #[arg(long, env = "ADMIN_EMAIL")]
    pub admin_email: Option<String>,
}

impl NotificationsConfig {
    #[must_use]
    pub fn sms(&self) -> Option<SmsConfig> {
        Some(SmsConfig {
            api_url: self.sms_api_url.clone(),
            username: self.sms_username.clone()?,
            api_key: self.sms_api_key.clone()?,
        })
    }

    #[must_use]
    pub fn email(&self) -> Option<EmailConfig> {
        Some(EmailConfig {
            host: self.smtp_host.clone()?,
            port: self.smtp_port,
            username: self.smtp_username.clone()?,
            password: self.smtp_password.clone()?,
            from: self.default_from_email.clone()?,
            admin: self.admin_email.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Wrapper {
        #[command(flatten)]
        notifications: NotificationsConfig,
    }

    #[test]
    fn sms_needs_username_and_key() {
        let config = Wrapper::parse_from(["test", "--sms-username", "sandbox"]).notifications;

        assert!(config.sms().is_none(), "api key is missing");

        let config = Wrapper::parse_from([
            "test",
            "--sms-username",
            "sandbox",
            "--sms-api-key",
            "key",
        ])
        .notifications;

        let sms = config.sms();

        assert!(
            sms.as_ref().is_some_and(|sms| sms.api_url == DEFAULT_SMS_API_URL),
            "expected sandbox endpoint, got {sms:?}"
        );
    }

    #[test]
    fn email_needs_every_smtp_value() {
        let config = Wrapper::parse_from([
            "test",
            "--smtp-host",
            "smtp.example.com",
            "--smtp-username",
            "mailer",
            "--smtp-password",
            "secret",
            "--default-from-email",
            "shop@example.com",
        ])
        .notifications;

        assert!(config.email().is_none(), "admin email is missing");
    }
}
