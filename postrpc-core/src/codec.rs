//! Encoding of requests and decoding of responses
//!
//! The codec is stateless: ids are generated here but remembering which id
//! was sent is the caller's job. [`decode_response`] takes the expected id as
//! an argument so one call's response can never be checked against another
//! call's id.
//!
//! # Decoding Order
//!
//! [`decode_response`] checks the envelope in a fixed order and stops at the
//! first failure:
//!
//! 1. body parses as `{result, error, id}` → else `Error::Decode`
//! 2. `error` is null or absent → else `Error::Remote`
//! 3. `result` is present → else `Error::Protocol`
//! 4. `result` is an array → else `Error::Decode`
//! 5. `id` matches the expected id → else `Error::Correlation`
//! 6. the first array element is an object → else `Error::ResultShape`
//!
//! # Examples
//!
//! ```rust
//! use postrpc_core::{codec, RequestEnvelope};
//! use serde_json::json;
//!
//! let id = codec::generate_id();
//! let request = RequestEnvelope::new("getinfo", json!([]), id);
//! let bytes = codec::encode_request(&request).unwrap();
//! assert!(!bytes.is_empty());
//!
//! let body = format!(r#"{{"result":[{{"a":1}}],"error":null,"id":{}}}"#, id);
//! let object = codec::decode_response(body.as_bytes(), id).unwrap();
//! assert_eq!(object["a"], 1);
//! ```

use crate::error::{Error, Result};
use crate::types::{RequestEnvelope, ResponseEnvelope, ResultObject};
use serde::Serialize;

/// Generate a fresh correlation id
///
/// Uniform over the full `u64` range; two calls collide with probability
/// about 1 in 2^64.
pub fn generate_id() -> u64 {
    rand::random::<u64>()
}

/// Convert caller params into a JSON value
///
/// Fails with `Error::Serialization` when the params have no JSON
/// representation (e.g. maps with non-string keys).
pub fn to_params<P: Serialize>(params: P) -> Result<serde_json::Value> {
    serde_json::to_value(params).map_err(|e| Error::Serialization(e.to_string()))
}

/// Encode a request envelope to JSON bytes
pub fn encode_request(request: &RequestEnvelope) -> Result<Vec<u8>> {
    serde_json::to_vec(request).map_err(|e| Error::Serialization(e.to_string()))
}

/// Parse a response body into an envelope
///
/// Only the first JSON value of the body is read; anything after it is
/// ignored. An empty body is a decode error.
pub fn decode_envelope(body: &[u8]) -> Result<ResponseEnvelope> {
    let value = serde_json::Deserializer::from_slice(body)
        .into_iter::<serde_json::Value>()
        .next()
        .ok_or_else(|| Error::Decode("empty response body".to_string()))?
        .map_err(|e| Error::Decode(e.to_string()))?;

    // serde would happily read a struct out of a JSON array
    if !value.is_object() {
        return Err(Error::Decode(format!(
            "response is not an object: {}",
            json_type_name(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| Error::Decode(e.to_string()))
}

/// Decode a response body and extract the result object
///
/// See the module docs for the order of the checks.
pub fn decode_response(body: &[u8], expected_id: u64) -> Result<ResultObject> {
    let envelope = decode_envelope(body)?;
    extract_result(envelope, expected_id)
}

/// Validate an already parsed envelope and extract the result object
pub fn extract_result(envelope: ResponseEnvelope, expected_id: u64) -> Result<ResultObject> {
    if let Some(error) = envelope.error {
        return Err(Error::remote(error));
    }

    let result = envelope
        .result
        .ok_or_else(|| Error::Protocol("server returned no result".to_string()))?;

    let items = match result {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(Error::Decode(format!(
                "result is not an array: {}",
                json_type_name(&other)
            )))
        }
    };

    if envelope.id != expected_id {
        return Err(Error::Correlation {
            expected: expected_id,
            returned: envelope.id,
        });
    }

    match items.into_iter().next() {
        Some(serde_json::Value::Object(object)) => Ok(object),
        _ => Err(Error::ResultShape("unexpected result shape".to_string())),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
