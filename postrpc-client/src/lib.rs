//! JSON-RPC style client over HTTP POST
//!
//! Each call is a single HTTP POST to `/targetrpc` on the configured server,
//! authenticated with basic auth carried in the URL. The response envelope is
//! checked for a server error, a missing result and a mismatched id, and the
//! first object of the result array is returned.
//!
//! There is no connection reuse, no retry and no timeout.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use postrpc_client::{HttpConfig, RpcClient};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpConfig::new("localhost", "8332")
//!         .with_credentials("alice", "secret");
//!     let client = RpcClient::new(config)?;
//!
//!     let balance = client.execute("getbalance", json!({"account": "main"})).await?;
//!     println!("Balance: {:?}", balance.get("amount"));
//!
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod config;
mod metrics;
mod transport;

pub use client::RpcClient;
pub use client_builder::ClientBuilder;
pub use config::{HttpConfig, RPC_PATH};
pub use metrics::ClientMetrics;
pub use transport::{status_line, HttpTransport, STATUS_OK};
