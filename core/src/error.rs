//! Error types for the accounts API client.
//!
//! # Design
//! Three failure sources are kept apart so callers can react to each:
//! the transport never produced a response (`Transport`), the service answered
//! with a non-success status (`Api`), or a success response did not contain
//! what the contract promised (`Decode`). Only the `Api` variant carries the
//! raw response.

use std::fmt;

use thiserror::Error;

use crate::http::HttpResponse;
use crate::types::ErrorBody;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `AccountsClient`.
#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with a status outside `[200, 400)`.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No response was received.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// A success response body could not be decoded into the expected type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request payload could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// The classified API error, if that is what this is.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Transport(TransportError::Cancelled))
    }
}

/// A non-success response from the service.
///
/// Keeps the whole response so callers can inspect headers or the raw body
/// when `message` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub response: HttpResponse,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn status_text(&self) -> &'static str {
        self.response.status_text()
    }

    /// The service's `error_message`, or `None` when the body had none.
    pub fn message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.response.status == 404
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status(), self.status_text())?;
        if let Some(message) = self.message() {
            write!(f, " - {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Failures below the HTTP layer: connection, DNS, TLS, cancellation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Escape hatch for custom `Transport` implementations.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Pass success responses through; turn everything else into an `ApiError`.
///
/// Never fails itself: an error body that is not `{"error_message": ...}`
/// just leaves the message empty.
pub fn classify(response: HttpResponse) -> std::result::Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    let message = if response.body.is_empty() {
        String::new()
    } else {
        match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(body) => body.error_message,
            Err(err) => {
                tracing::debug!(status = response.status, %err, "error body is not an error envelope");
                String::new()
            }
        }
    };
    Err(ApiError { response, message })
}
