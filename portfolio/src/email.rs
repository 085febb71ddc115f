use anyhow::Context;
use portfolio_config::EmailConfig;
use portfolio_email_impl::{EmailServiceImpl, SmtpConfig, SmtpCredentials};
use tracing::warn;

/// Create the smtp client. No connection is opened until the first message
/// is sent.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    let credentials = match &config.password {
        Some(password) => Some(SmtpCredentials {
            username: config.username.clone(),
            password: password.clone(),
        }),
        None => {
            warn!("No smtp password configured, authentication will be skipped");
            None
        }
    };

    let smtp_config = SmtpConfig {
        host: config.smtp_host.clone(),
        port: config.smtp_port,
        starttls: config.starttls,
        credentials,
        timeout: config.timeout.map(Into::into),
    };

    EmailServiceImpl::new(&smtp_config, config.from.clone())
        .context("Failed to create smtp client")
}
