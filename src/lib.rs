//! postrpc - JSON-RPC style calls over HTTP POST
//!
//! Convenience crate re-exporting the postrpc sub-crates.
//!
//! - **postrpc-core**: envelopes, codec, errors, observability
//! - **postrpc-client**: HTTP configuration, transport and client
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use postrpc::{HttpConfig, RpcClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RpcClient::new(HttpConfig::from_env())?;
//!
//!     let info = client.execute("getinfo", serde_json::json!([])).await?;
//!     println!("Info: {:?}", info);
//!
//!     Ok(())
//! }
//! ```

pub use postrpc_client as client;
pub use postrpc_core as core;

pub use postrpc_client::{ClientBuilder, HttpConfig, RpcClient};
pub use postrpc_core::{Error, Result, ResultObject};
