use portfolio_config::Config;
use portfolio_email_contracts::EmailService;
use tracing::{info, warn};

use crate::{
    email,
    environment::{ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(
        "Using smtp server {}:{}",
        config.email.smtp_host, config.email.smtp_port
    );
    let email = email::connect(&config.email)?;
    if let Err(err) = email.ping().await {
        warn!("Smtp server is not reachable, sending messages will fail: {err:#}");
    }

    let config_provider = ConfigProvider::new(&config);
    let provider = Provider::new(config_provider, email)?;
    let server = provider.rest_server();
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
