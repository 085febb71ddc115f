use std::sync::Arc;

use axum::{extract::State, routing, Json, Router};
use portfolio_core_health_contracts::{HealthService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: String,
    version: &'static str,
}

async fn health(service: State<Arc<impl HealthService>>) -> Json<HealthResponse> {
    let HealthStatus { service, version } = service.get_status();

    Json(HealthResponse {
        status: "healthy",
        service: service.to_string(),
        version,
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use portfolio_core_health_contracts::MockHealthService;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::tests::json_body;

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let service = MockHealthService::new().with_get_status(HealthStatus {
            service: "portfolio-backend".into(),
            version: "1.0.0",
        });
        let sut = router(service.into());

        // Act
        let response = sut
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({
                "status": "healthy",
                "service": "portfolio-backend",
                "version": "1.0.0",
            })
        );
    }

    #[tokio::test]
    async fn post_is_not_allowed() {
        let sut = router(MockHealthService::new().into());

        let response = sut
            .oneshot(Request::post("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
