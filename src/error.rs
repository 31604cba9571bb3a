// Admin client error types
use thiserror::Error;

/// Errors that abort an admin call or workflow.
///
/// A non-200 response from the homeserver is NOT an error here: it is returned
/// as a regular `AdminResponse` and reported as a failed step by the caller.
#[derive(Error, Debug)]
pub enum AdminError {
    /// DNS, connect, TLS or timeout failure below the HTTP layer
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Login failed with status {status}: {body}")]
    Login { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
}

impl AdminError {
    pub fn config(message: impl Into<String>) -> Self {
        AdminError::Config(message.into())
    }

    /// Whether the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, AdminError::Transport(_))
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
