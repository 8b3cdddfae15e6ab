//! Request and response envelopes
//!
//! The wire format is JSON-RPC 2.0 flavoured but not a general JSON-RPC
//! implementation: the target server wraps its result in a singleton array,
//! and ids are always unsigned 64-bit integers.
//!
//! ```text
//! request:  {"method": <string>, "params": <any>, "id": <uint64>, "jsonrpc": "2.0"}
//! response: {"result": [ {..}, .. ] | null, "error": <any> | null, "id": <uint64>}
//! ```

use serde::{Deserialize, Serialize};

/// Protocol version sent with every request
pub const JSONRPC_VERSION: &str = "2.0";

/// The object a successful call resolves to
///
/// This is the first element of the response's `result` array.
pub type ResultObject = serde_json::Map<String, serde_json::Value>;

/// Request envelope
///
/// Built fresh for every call. Field order matches the wire order.
///
/// # Examples
///
/// ```rust
/// use postrpc_core::RequestEnvelope;
/// use serde_json::json;
///
/// let req = RequestEnvelope::new("getinfo", json!([]), 7);
/// assert_eq!(req.jsonrpc, "2.0");
/// assert_eq!(req.id, 7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Name of the remote method to invoke
    pub method: String,
    /// Parameters passed to the method, serialized even when null
    pub params: serde_json::Value,
    /// Correlation id echoed back by the server
    pub id: u64,
    /// Always [`JSONRPC_VERSION`]
    pub jsonrpc: String,
}

impl RequestEnvelope {
    /// Create a request envelope with the protocol version filled in
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: u64) -> Self {
        Self {
            method: method.into(),
            params,
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
        }
    }
}

/// Response envelope
///
/// `null` and absent `result`/`error` fields both decode to `None`. A missing
/// `id` decodes as `0`, which only correlates with a client that has not sent
/// anything yet.
///
/// Some servers capitalise the keys (`Result`, `Error`, `ID`); the
/// capitalised and upper-case spellings are accepted as aliases. A body that
/// carries two spellings of the same key is a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// The server's result, expected to be an array
    #[serde(default, alias = "Result", alias = "RESULT")]
    pub result: Option<serde_json::Value>,
    /// Application-level error, any JSON value
    #[serde(default, alias = "Error", alias = "ERROR")]
    pub error: Option<serde_json::Value>,
    /// Id of the request this response answers
    #[serde(default, alias = "Id", alias = "ID")]
    pub id: u64,
}
