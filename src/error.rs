//! Error types for the petstore client.
//!
//! [`EncodeError`] is the only failure the encoder and the request builders
//! produce on their own. Everything the transport raises is carried in
//! [`ApiError`] without being rewrapped, so callers can match on the original
//! `reqwest::Error` or on the status/body pair the server answered with.

use std::path::PathBuf;

use thiserror::Error;

/// A value could not be reduced to a JSON-compatible tree.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Neither the mapping view nor the attribute view of an opaque value was
    /// available. `failures` keeps both attempts, in the order they were made.
    #[error("unable to encode value of type `{type_name}`: {}", failures.join("; "))]
    Unencodable {
        type_name: &'static str,
        failures: Vec<String>,
    },

    /// A mapping key encoded to an array or object, which JSON cannot use as a key.
    #[error("mapping key of type `{type_name}` cannot be used as a JSON object key")]
    InvalidKey { type_name: &'static str },

    /// Paths are emitted as JSON strings, which cannot hold non-UTF-8 bytes.
    #[error("path `{}` is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },

    /// A registered converter refused the value it was handed.
    #[error("custom encoder for `{type_name}` failed: {message}")]
    Converter {
        type_name: &'static str,
        message: String,
    },
}

/// Errors surfaced by `ApiClient` and the API façades.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The HTTP round-trip itself failed (connect, send, read).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The response body did not match the declared response type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A header name or value supplied by the caller is not valid HTTP.
    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },

    /// A multipart part could not be built (bad content type).
    #[error("invalid multipart part `{field}`: {message}")]
    Multipart { field: String, message: String },

    /// The blocking adapter could not start its runtime.
    #[error("failed to start blocking runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl ApiError {
    /// HTTP status for server-side failures, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
