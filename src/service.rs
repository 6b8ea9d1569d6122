use crate::llm_wrapper::LlmClient;
use crate::logger::{AuditLog, SEPARATOR, TIMESTAMP_FORMAT};
use crate::settings::Settings;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// The one failure HTTP callers ever see. Upstream and storage detail stays
/// in the server-side logs.
#[derive(Debug, Error)]
#[error("An error occurred while processing your request.")]
pub struct CompletionFailure;

/// Bridges one inbound message to one upstream chat-completion call, with an
/// audit trail written around the boundary.
pub struct CompletionService {
    settings: Arc<Settings>,
    audit: Arc<AuditLog>,
    llm: LlmClient,
}

impl CompletionService {
    pub fn new(settings: Arc<Settings>, audit: Arc<AuditLog>, llm: LlmClient) -> Self {
        Self {
            settings,
            audit,
            llm,
        }
    }

    /// Requests a JSON-formatted completion for `user_message`.
    ///
    /// On success the audit log gains exactly one contiguous block:
    /// Request, Response, Request Start Time, Request End Time, separator.
    /// On failure the block carries an `Error:` line instead of a `Response:`
    /// line, and the caller gets the generic [`CompletionFailure`].
    pub async fn request_completion(&self, user_message: &str) -> Result<String, CompletionFailure> {
        let started_at = self.audit.now();
        let system_prompt = format!("{} output JSON.", self.settings.llm_prompt);

        match self.llm.chat_json(&system_prompt, user_message).await {
            Ok(answer) => {
                let finished_at = self.audit.now();
                let block = [
                    format!("Request: {user_message}"),
                    format!("Response: {answer}"),
                    format!("Request Start Time: {}", started_at.format(TIMESTAMP_FORMAT)),
                    format!("Request End Time: {}", finished_at.format(TIMESTAMP_FORMAT)),
                    SEPARATOR.to_string(),
                ];
                self.audit.append(&block).map_err(|e| {
                    error!(error = %e, "failed to write audit entry");
                    CompletionFailure
                })?;
                Ok(answer)
            }
            Err(e) => {
                error!(error = %e, "chat completion failed");
                let block = [
                    format!("Request: {user_message}"),
                    format!("Error: {e}"),
                    SEPARATOR.to_string(),
                ];
                if let Err(io_err) = self.audit.append(&block) {
                    error!(error = %io_err, "failed to write audit entry for failed request");
                }
                Err(CompletionFailure)
            }
        }
    }
}
