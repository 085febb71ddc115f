use std::time::Duration;

use anyhow::{anyhow, Context};
use lettre::{
    message::{header, Mailbox, MessageBuilder, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use portfolio_email_contracts::{ContentType, Email, EmailService};
use portfolio_models::email_address::EmailAddress;
use portfolio_utils::Apply;
use tracing::debug;

/// Sends emails through an smtp relay.
///
/// Every message is delivered over a fresh connection which is closed again
/// before [`EmailService::send`] returns.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: EmailAddress,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Upgrade the connection using `STARTTLS` before authenticating.
    pub starttls: bool,
    pub credentials: Option<SmtpCredentials>,
    pub timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl EmailServiceImpl {
    pub fn new(config: &SmtpConfig, from: EmailAddress) -> anyhow::Result<Self> {
        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .with_context(|| format!("Invalid smtp host {}", config.host))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let transport = builder
            .port(config.port)
            .apply_map(config.timeout, |builder, timeout| {
                builder.timeout(Some(timeout))
            })
            .apply_map(config.credentials.clone(), |builder, credentials| {
                builder.credentials(Credentials::new(credentials.username, credentials.password))
            })
            .build();

        Ok(Self { from, transport })
    }

    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        let config = SmtpConfig {
            host: "dummy".into(),
            port: 25,
            starttls: false,
            credentials: None,
            timeout: None,
        };
        Self::new(&config, "dummy@example.com".parse().unwrap()).unwrap()
    }

    fn build_message(&self, email: Email) -> anyhow::Result<Message> {
        let builder = Message::builder()
            .from(Mailbox::from(self.from.0.clone()))
            .to(Mailbox::from(email.recipient.0))
            .apply_map(email.reply_to.map(|reply_to| reply_to.0), MessageBuilder::reply_to)
            .subject(email.subject);

        let message = match email.content_type {
            ContentType::Text => builder.header(header::ContentType::TEXT_PLAIN).body(email.body),
            ContentType::Html => {
                builder.multipart(MultiPart::mixed().singlepart(SinglePart::html(email.body)))
            }
        };

        message.context("Failed to build email message")
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let message = self.build_message(email)?;

        let response = self
            .transport
            .send(message)
            .await
            .context("Failed to send email")?;

        debug!(?response, "smtp relay responded");

        Ok(response.is_positive())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
