use std::sync::Arc;

use portfolio_core_health_contracts::{HealthService, HealthStatus};
use portfolio_utils::portfolio_version;

#[derive(Debug, Clone)]
pub struct HealthServiceImpl {
    config: HealthServiceConfig,
}

#[derive(Debug, Clone)]
pub struct HealthServiceConfig {
    /// Service name reported by the health check.
    pub service: Arc<str>,
}

impl HealthServiceImpl {
    pub fn new(config: HealthServiceConfig) -> Self {
        Self { config }
    }
}

impl HealthService for HealthServiceImpl {
    fn get_status(&self) -> HealthStatus {
        HealthStatus {
            service: Arc::clone(&self.config.service),
            version: portfolio_version(),
        }
    }
}
