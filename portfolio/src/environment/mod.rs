use std::{net::SocketAddr, sync::Arc};

use portfolio_api_rest::RestServerConfig;
use portfolio_config::Config;
use portfolio_core_contact_impl::ContactServiceConfig;
use portfolio_core_health_impl::HealthServiceConfig;
use types::{ContactFeature, Email, HealthFeature, RestServer, Template, Time};

pub mod types;

/// Provides the fully wired services of the backend.
pub struct Provider {
    config: ConfigProvider,
    template: Template,
    email: Email,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            template: Template::new()?,
            email,
        })
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(
            self.health_feature(),
            self.contact_feature(),
            self.config.rest_server_config.clone(),
        )
    }

    pub fn health_feature(&self) -> HealthFeature {
        HealthFeature::new(self.config.health_service_config.clone())
    }

    pub fn contact_feature(&self) -> ContactFeature {
        ContactFeature::new(
            Time::default(),
            self.template.clone(),
            self.email.clone(),
            self.config.contact_service_config.clone(),
        )
    }
}

/// Service configurations derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    rest_server_config: RestServerConfig,
    contact_service_config: ContactServiceConfig,
    health_service_config: HealthServiceConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        // API
        let rest_server_config = RestServerConfig {
            addr: SocketAddr::new(config.http.host, config.http.port),
        };

        // Core
        let contact_service_config = ContactServiceConfig {
            recipient: config
                .contact
                .recipient
                .clone()
                .unwrap_or_else(|| config.email.from.clone())
                .into(),
        };

        let health_service_config = HealthServiceConfig {
            service: config.health.service.as_str().into(),
        };

        Self {
            rest_server_config,
            contact_service_config,
            health_service_config,
        }
    }
}
