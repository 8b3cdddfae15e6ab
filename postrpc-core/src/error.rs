//! Error types for postrpc
//!
//! Every failure of a call is surfaced to the caller as a variant of [`Error`].
//! The library never retries and never treats a failure as fatal; the caller
//! decides what to do with it.
//!
//! # Error Categories
//!
//! - **Before the wire**: `Serialization` (params could not be encoded)
//! - **Transport**: `Transport` (connection, request construction, body read)
//! - **HTTP**: `HttpStatus` (status line was not exactly `200 OK`)
//! - **Envelope**: `Decode`, `Protocol`, `ResultShape`
//! - **Remote**: `Remote` (the server populated the `error` field)
//! - **Correlation**: `Correlation` (response id does not match the request id)
//!
//! # Examples
//!
//! ```rust
//! use postrpc_core::Error;
//!
//! let error = Error::Correlation { expected: 42, returned: 43 };
//! assert_eq!(error.to_string(), "id mismatch: expected=42 returned=43");
//! assert_eq!(error.kind(), "correlation");
//! ```

use thiserror::Error;

/// Result type for postrpc operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for every postrpc operation
///
/// Variants carry rendered messages rather than source errors so the type
/// stays `Clone` and can be handed to metrics and callers alike.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Request params could not be represented as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The HTTP request could not be built, sent, or its body read
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a status line other than `200 OK`
    ///
    /// Holds the status line as received, e.g. `404 Not Found`.
    #[error("Server reports status: {0}")]
    HttpStatus(String),

    /// The response body was not valid JSON or did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The server reported an application-level error
    ///
    /// `message` is a rendering of `data`: JSON strings render as their
    /// contents, any other value as compact JSON.
    #[error("Remote error: {message}")]
    Remote {
        /// Human-readable rendering of the error value
        message: String,
        /// The raw `error` value from the response envelope
        data: serde_json::Value,
    },

    /// The server reported success but supplied no result
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The response id does not match the id of the request it answers
    #[error("id mismatch: expected={expected} returned={returned}")]
    Correlation {
        /// Id sent with the request
        expected: u64,
        /// Id echoed by the server
        returned: u64,
    },

    /// The result array was empty or its first element was not an object
    #[error("Result shape error: {0}")]
    ResultShape(String),
}

impl Error {
    /// Build a `Remote` error from the raw `error` value of a response
    pub fn remote(data: serde_json::Value) -> Self {
        let message = match &data {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Error::Remote { message, data }
    }

    /// Stable snake_case label for the variant
    ///
    /// Used as a metrics attribute, so the values must not change.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Serialization(_) => "serialization",
            Error::Transport(_) => "transport",
            Error::HttpStatus(_) => "http_status",
            Error::Decode(_) => "decode",
            Error::Remote { .. } => "remote",
            Error::Protocol(_) => "protocol",
            Error::Correlation { .. } => "correlation",
            Error::ResultShape(_) => "result_shape",
        }
    }
}
