use serde::Deserialize;

/// Request body for `POST /content`.
#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    /// The user's prompt. The only field this service consumes.
    pub message: String,
}
