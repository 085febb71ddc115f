use std::sync::Arc;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthService: Send + Sync + 'static {
    /// Liveness status of the service. Does not depend on the smtp relay.
    fn get_status(&self) -> HealthStatus;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub service: Arc<str>,
    pub version: &'static str,
}

#[cfg(feature = "mock")]
impl MockHealthService {
    pub fn with_get_status(mut self, status: HealthStatus) -> Self {
        self.expect_get_status().return_const(status);
        self
    }
}
