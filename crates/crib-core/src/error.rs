//! Error taxonomy for the account flows.
//!
//! None of these are fatal: every variant is recoverable by the user
//! retrying (re-entering a code, waiting for the next resend window).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Transport failure, timeout, or an HTTP error without a usable body.
    #[error("{0}")]
    Network(String),

    /// Well-formed response that reports a non-success status.
    #[error("{message}")]
    Application { message: String },

    /// Durable storage could not be read, parsed, or written.
    #[error("{0}")]
    Persistence(String),
}

impl FlowError {
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Maps a reqwest transport error to a user-facing message.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Network("Request timed out".to_string());
        }
        if let Some(status) = err.status() {
            return Self::http_status(status.as_u16());
        }
        if err.is_connect() {
            return Self::Network("Network Error".to_string());
        }
        Self::Network(format!("Network Error: {err}"))
    }

    pub fn http_status(status: u16) -> Self {
        Self::Network(format!("Request failed with status code {status}"))
    }
}

pub type FlowResult<T> = std::result::Result<T, FlowError>;
