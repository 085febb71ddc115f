use std::net::SocketAddr;

use axum::Router;
use portfolio_core_contact_contracts::ContactService;
use portfolio_core_health_contracts::HealthService;
use portfolio_utils::Apply;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthService,
    Contact: ContactService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()))
            .apply(middlewares::panic_handler::add)
            .apply(middlewares::trace::add)
            .apply(middlewares::request_id::add)
            .apply(middlewares::cors::add)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(err) => tracing::error!("Failed to listen for shutdown signal: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use portfolio_core_contact_contracts::MockContactService;
    use portfolio_core_health_contracts::{HealthStatus, MockHealthService};
    use tower::ServiceExt;

    use super::*;

    type Sut = RestServer<MockHealthService, MockContactService>;

    fn sut(contact: MockContactService) -> Sut {
        let health = MockHealthService::new().with_get_status(HealthStatus {
            service: "portfolio-backend".into(),
            version: "1.0.0",
        });

        RestServer::new(
            health,
            contact,
            RestServerConfig {
                addr: ([127, 0, 0, 1], 0).into(),
            },
        )
    }

    #[tokio::test]
    async fn request_id_header() {
        let response = sut(MockContactService::new())
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get("X-Request-Id").unwrap();
        assert!(!request_id.is_empty());
    }

    #[tokio::test]
    async fn cors_any_origin() {
        let response = sut(MockContactService::new())
            .router()
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://portfolio.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn cors_preflight() {
        let response = sut(MockContactService::new())
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/send-email")
                    .header(header::ORIGIN, "https://portfolio.example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[tokio::test]
    async fn request_id_is_exposed_to_browsers() {
        let response = sut(MockContactService::new())
            .router()
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://portfolio.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let exposed = response.headers()[header::ACCESS_CONTROL_EXPOSE_HEADERS]
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(exposed.contains("x-request-id"));
        assert_eq!(response.headers()["x-request-id"].len(), 22);
    }

    #[tokio::test]
    async fn unknown_route() {
        let response = sut(MockContactService::new())
            .router()
            .oneshot(Request::get("/unknown").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
