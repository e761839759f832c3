use thiserror::Error;

/// Message shown when the server did not supply a usable error string.
const GENERIC_FAILURE: &str = "Unable to save right now. Your answers are still here; please try again.";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("save rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl GatewayError {
    /// The toast-friendly message: the server's `error` string when it sent
    /// one, otherwise a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected { message, .. } if !message.is_empty() => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}
