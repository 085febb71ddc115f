use std::net::IpAddr;

use anyhow::Context;
use config::{File, FileFormat};
use portfolio_models::email_address::EmailAddress;
use serde::Deserialize;

pub use duration::Duration;

mod duration;

/// The configuration that is compiled into the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Environment variable containing a colon separated list of additional
/// config files, applied in order on top of the default configuration.
pub const CONFIG_PATHS_ENV: &str = "PORTFOLIO_CONFIG";

/// Load the configuration from the default config, the files listed in
/// `PORTFOLIO_CONFIG` and the `EMAIL_USER`/`EMAIL_PASSWORD` environment
/// variables.
pub fn load() -> anyhow::Result<Config> {
    let mut sources = Vec::new();
    if let Ok(paths) = std::env::var(CONFIG_PATHS_ENV) {
        for path in paths.split(':').filter(|p| !p.is_empty()) {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {path}"))?;
            sources.push(content);
        }
    }

    load_from(&sources, &EnvOverrides::from_env())
}

/// Load the configuration from the default config followed by the given toml
/// `sources`, then apply the environment `overrides`.
pub fn load_from(sources: &[impl AsRef<str>], overrides: &EnvOverrides) -> anyhow::Result<Config> {
    let builder = std::iter::once(DEFAULT_CONFIG)
        .chain(sources.iter().map(AsRef::as_ref))
        .fold(config::Config::builder(), |builder, source| {
            builder.add_source(File::from_str(source, FileFormat::Toml))
        });

    builder
        .set_override_option("email.from", overrides.email_user.clone())?
        .set_override_option("email.username", overrides.email_user.clone())?
        .set_override_option("email.password", overrides.email_password.clone())?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Values taken from the process environment that take precedence over all
/// config files.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `EMAIL_USER`: sender address and smtp username
    pub email_user: Option<String>,
    /// `EMAIL_PASSWORD`: smtp password
    pub email_password: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            email_user: var("EMAIL_USER"),
            email_password: var("EMAIL_PASSWORD"),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    #[serde(default = "default_starttls")]
    pub starttls: bool,
    pub from: EmailAddress,
    pub username: String,
    pub password: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactConfig {
    /// Address receiving contact form notifications. Defaults to `email.from`.
    pub recipient: Option<EmailAddress>,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub service: String,
}

fn default_starttls() -> bool {
    true
}
