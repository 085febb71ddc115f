use std::borrow::Cow;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResult;

pub mod contact;
pub mod health;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("Error processing request: {err:#}");
    failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        "An error occurred. Please try again.",
    )
}

fn success(message: impl Into<Cow<'static, str>>) -> Response {
    Json(ApiResult {
        success: true,
        message: message.into(),
    })
    .into_response()
}

fn failure(code: StatusCode, message: impl Into<Cow<'static, str>>) -> Response {
    (
        code,
        Json(ApiResult {
            success: false,
            message: message.into(),
        }),
    )
        .into_response()
}

#[cfg(test)]
pub mod tests {
    use axum::response::Response;
    use serde_json::Value;

    pub async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
