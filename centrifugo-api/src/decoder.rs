//! Decoding of non-2xx responses into [`Error`] values.
//!
//! Centrifugo nests failure details under a top-level `error` object. When a
//! failed response carries one, the caller gets [`Error::Api`] with the code
//! and message; anything else (empty body, non-JSON, missing or `null`
//! `error`) falls back to the generic [`Error::Status`].

use std::io::Read;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{ApiError, Error, ServerError};

/// Turns a failed HTTP response into an error value.
///
/// `body` is handed over by value so that it is released on every return
/// path. Implementations must always produce an error; there is no success
/// outcome for a non-2xx response.
pub trait ErrorDecoder: Send + Sync {
    fn decode(&self, method: &str, status: StatusCode, body: Box<dyn Read + Send + '_>) -> Error;
}

/// Default decoder for the Centrifugo error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiErrorDecoder;

/// Only the `error` field matters; `result` and anything else are ignored.
#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ApiError>,
}

impl ApiErrorDecoder {
    /// Decode from an owned reader. The reader is dropped before returning.
    pub fn decode_reader<R: Read>(&self, method: &str, status: StatusCode, mut body: R) -> Error {
        let mut buf = Vec::new();
        let read = body.read_to_end(&mut buf);
        drop(body);

        if let Err(e) = read {
            tracing::debug!(method, status = status.as_u16(), "failed to read error body: {e}");
            return fallback(method, status, String::new());
        }

        let text = String::from_utf8_lossy(&buf).into_owned();
        match extract_error(&text) {
            Some(error) => Error::Api(ServerError::new(error, text, status)),
            None => fallback(method, status, text),
        }
    }
}

impl ErrorDecoder for ApiErrorDecoder {
    fn decode(&self, method: &str, status: StatusCode, body: Box<dyn Read + Send + '_>) -> Error {
        self.decode_reader(method, status, body)
    }
}

/// Parse-and-extract step. `None` selects the generic fallback.
fn extract_error(text: &str) -> Option<ApiError> {
    if text.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorEnvelope>(text) {
        Ok(envelope) => envelope.error,
        Err(e) => {
            tracing::debug!("error body is not a Centrifugo envelope: {e}");
            None
        }
    }
}

fn fallback(method: &str, status: StatusCode, body: String) -> Error {
    Error::Status {
        method: method.to_string(),
        status,
        body,
    }
}
