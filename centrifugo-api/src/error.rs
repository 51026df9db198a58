//! Error types returned by this crate.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Error object from the Centrifugo error envelope (`{"error": {...}}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    pub code: u32,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "Centrifugo API error (code {})", self.code)
        } else {
            write!(
                f,
                "Centrifugo API error (code {}): {}",
                self.code, self.message
            )
        }
    }
}

/// A non-2xx response whose body carried a well-formed error envelope.
#[derive(Debug, Clone)]
pub struct ServerError {
    error: ApiError,
    body: String,
    status: StatusCode,
}

impl ServerError {
    pub fn new(error: ApiError, body: String, status: StatusCode) -> Self {
        Self {
            error,
            body,
            status,
        }
    }

    pub fn code(&self) -> u32 {
        self.error.code
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }

    pub fn error(&self) -> &ApiError {
        &self.error
    }

    /// Raw response body, kept for diagnostics.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [HTTP {}]", self.error, self.status.as_u16())
    }
}

/// Errors returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Non-2xx response with a decodable `error` envelope.
    #[error("{0}")]
    Api(ServerError),

    /// Non-2xx response that could not be decoded further.
    #[error("{method} failed with HTTP {}", .status.as_u16())]
    Status {
        method: String,
        status: StatusCode,
        body: String,
    },

    /// Error reported in-band inside a successful HTTP response.
    #[error("{0}")]
    Reply(ApiError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Centrifugo error code, for decoded and in-band errors.
    pub fn code(&self) -> Option<u32> {
        match self {
            Error::Api(e) => Some(e.code()),
            Error::Reply(e) => Some(e.code),
            _ => None,
        }
    }

    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api(e) => Some(e.status()),
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidRequest(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
