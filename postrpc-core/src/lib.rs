//! Core envelope types and codec for postrpc
//!
//! This crate holds everything about a call that does not touch the network:
//!
//! - **Types**: request and response envelopes
//! - **Codec**: request encoding, id generation, response decoding and correlation
//! - **Error handling**: the error taxonomy shared by every postrpc crate
//! - **Observability**: tracing subscriber and OpenTelemetry bootstrap
//!
//! The HTTP side lives in `postrpc-client`.
//!
//! # Example
//!
//! ```rust
//! use postrpc_core::{codec, Error, RequestEnvelope};
//! use serde_json::json;
//!
//! let request = RequestEnvelope::new("getinfo", json!([]), 42);
//! let bytes = codec::encode_request(&request).unwrap();
//! assert!(String::from_utf8(bytes).unwrap().contains("\"id\":42"));
//!
//! let err = codec::decode_response(br#"{"result":[{"a":1}],"id":43}"#, 42).unwrap_err();
//! assert!(matches!(err, Error::Correlation { expected: 42, returned: 43 }));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;

pub use error::{Error, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{RequestEnvelope, ResponseEnvelope, ResultObject, JSONRPC_VERSION};
