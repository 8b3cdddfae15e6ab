//! The RPC client
//!
//! [`RpcClient::execute`] runs one full call: encode, POST, status check,
//! decode. The id generated for a call is carried through to the decode step
//! of that same call, so sharing a client between tasks is safe for
//! `execute`.
//!
//! The client also remembers the most recently generated id. The split
//! [`RpcClient::encode_request`] / [`RpcClient::decode_response`] pair
//! correlates through that value, which makes the pair unsafe to interleave
//! across tasks on one client without outside synchronization.

use crate::config::HttpConfig;
use crate::metrics::ClientMetrics;
use crate::transport::HttpTransport;
use postrpc_core::{codec, Error, RequestEnvelope, Result, ResultObject};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// JSON-RPC style client over HTTP POST
///
/// A client keeps the id of the most recently encoded request next to its
/// [`HttpConfig`]. Building one does not touch the network.
///
/// # Call Lifecycle
///
/// 1. **Encode**: a fresh random id is generated and recorded, the params are
///    serialized into `{method, params, id, jsonrpc}`
/// 2. **Send**: the body is POSTed to `/targetrpc` with basic auth
/// 3. **Status**: anything but a literal `200 OK` status line stops here
/// 4. **Decode**: the envelope is checked against the id from step 1 and the
///    first object of the result array is returned
///
/// # Concurrency
///
/// `execute` and `call` may run concurrently on a shared client; each call
/// checks the response against its own id. `last_id` is then whichever call
/// encoded last. `encode_request` followed by `decode_response` relies on
/// `last_id` and must not interleave with other calls on the same client.
///
/// # Examples
///
/// ```rust,no_run
/// use postrpc_client::{HttpConfig, RpcClient};
/// use serde_json::json;
///
/// # async fn example() -> postrpc_core::Result<()> {
/// let config = HttpConfig::new("localhost", "8332").with_credentials("alice", "secret");
/// let client = RpcClient::new(config)?;
///
/// let info = client.execute("getinfo", json!([])).await?;
/// println!("blocks: {}", info["blocks"]);
/// # Ok(())
/// # }
/// ```
pub struct RpcClient {
    pub(crate) config: HttpConfig,
    pub(crate) transport: HttpTransport,
    pub(crate) last_id: AtomicU64,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl RpcClient {
    /// Create a client with default settings
    ///
    /// Use [`ClientBuilder`](crate::ClientBuilder) to enable observability.
    pub fn new(config: HttpConfig) -> Result<Self> {
        crate::ClientBuilder::new(config).build()
    }

    /// The connection settings in use
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// The id generated by the most recent encode, 0 before the first one
    pub fn last_id(&self) -> u64 {
        self.last_id.load(Ordering::SeqCst)
    }

    /// Encode a request and remember its id as the expected response id
    ///
    /// Fails with `Error::Serialization` if `params` has no JSON
    /// representation. The id is recorded even then.
    pub fn encode_request<P: Serialize>(&self, method: &str, params: P) -> Result<Vec<u8>> {
        let (_, bytes) = self.prepare(method, params)?;
        Ok(bytes)
    }

    /// Decode a response body against the most recently generated id
    pub fn decode_response(&self, body: &[u8]) -> Result<ResultObject> {
        codec::decode_response(body, self.last_id())
    }

    /// Call a remote method and return the first object of its result array
    ///
    /// # Errors
    ///
    /// - `Serialization`: params could not be encoded
    /// - `Transport`: bad endpoint, connection failure, or unreadable body
    /// - `HttpStatus`: status line other than `200 OK`
    /// - `Decode`, `Remote`, `Protocol`, `Correlation`, `ResultShape`: see
    ///   [`codec::decode_response`]
    pub async fn execute<P: Serialize>(&self, method: &str, params: P) -> Result<ResultObject> {
        let start = Instant::now();
        let outcome = self.execute_once(method, params).await;
        let duration = start.elapsed().as_secs_f64();

        if let Some(ref m) = self.metrics {
            match &outcome {
                Ok(_) => m.record_request(method, "success", duration),
                Err(e) => {
                    m.record_request(method, "error", duration);
                    m.record_error(e.kind());
                }
            }
        }

        match &outcome {
            Ok(_) => tracing::debug!(method = %method, duration_secs = duration, "Call completed"),
            Err(e) => tracing::debug!(method = %method, kind = e.kind(), "Call failed"),
        }

        outcome
    }

    /// Like [`execute`](Self::execute), then deserialize the result object into `R`
    ///
    /// A result object that does not fit `R` fails with `Error::Decode`.
    pub async fn call<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let object = self.execute(method, params).await?;
        serde_json::from_value(serde_json::Value::Object(object))
            .map_err(|e| Error::Decode(e.to_string()))
    }

    async fn execute_once<P: Serialize>(&self, method: &str, params: P) -> Result<ResultObject> {
        let (id, request) = self.prepare(method, params)?;
        let url = self.config.endpoint()?;

        tracing::debug!(
            method = %method,
            id,
            host = %self.config.host,
            port = %self.config.port,
            "Sending request"
        );

        let body = self.transport.post(url, request).await?;
        codec::decode_response(&body, id)
    }

    fn prepare<P: Serialize>(&self, method: &str, params: P) -> Result<(u64, Vec<u8>)> {
        let id = codec::generate_id();
        self.last_id.store(id, Ordering::SeqCst);

        let params = codec::to_params(params)?;
        let request = RequestEnvelope::new(method, params, id);
        Ok((id, codec::encode_request(&request)?))
    }
}
