use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{ContactSendMessageError, ContactService};
use serde_json::{Map, Value};
use tracing::Span;

use super::{failure, internal_server_error, success};
use crate::models::contact::{ApiContactSubmission, MissingField};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/send-email", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(Json(payload)) => ApiContactSubmission::from(payload),
        Err(err) => return internal_server_error(err),
    };

    let submission = match submission.validate() {
        Ok(submission) => submission,
        Err(MissingField(field)) => {
            return failure(StatusCode::BAD_REQUEST, format!("{field} is required"))
        }
    };

    Span::current().record("submitter", submission.email.as_str());

    match service.send_message(submission).await {
        Ok(()) => success("Message sent successfully! I'll get back to you soon."),
        Err(ContactSendMessageError::Send) => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to send message. Please try again later.",
        ),
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}
