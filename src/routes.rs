//! Axum router construction and the `/content` handler.

use crate::schemas::content::ContentRequest;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Build the application [`Router`].
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/content", post(create_content))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `POST /content` — forwards the message to the upstream completion API and
/// returns the raw answer text.
///
/// The upstream is asked for JSON content, but the body is passed through
/// verbatim without server-side validation. A missing or malformed `message`
/// field is rejected with 400; every processing failure maps to a single
/// generic 500 message so that upstream detail never reaches the caller.
async fn create_content(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ContentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("invalid request body: {rejection}"),
            )
                .into_response();
        }
    };

    match state.service.request_completion(&request.message).await {
        Ok(answer) => answer.into_response(),
        Err(failure) => (StatusCode::INTERNAL_SERVER_ERROR, failure.to_string()).into_response(),
    }
}
