//! Allow cross-origin requests from any origin

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use super::request_id::REQUEST_ID_HEADER;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
            .expose_headers([REQUEST_ID_HEADER]),
    )
}
