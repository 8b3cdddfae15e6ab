//! Client builder
//!
//! ```rust,no_run
//! use postrpc_client::{ClientBuilder, HttpConfig};
//!
//! # fn example() -> postrpc_core::Result<()> {
//! let client = ClientBuilder::new(HttpConfig::from_env())
//!     .with_default_observability()
//!     .service_name("ledger-sync")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::config::HttpConfig;
use crate::metrics::ClientMetrics;
use crate::transport::HttpTransport;
use crate::RpcClient;
use postrpc_core::Result;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// Builder for configuring and creating an [`RpcClient`]
pub struct ClientBuilder {
    config: HttpConfig,
    observability_config: Option<postrpc_core::ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Start from the given connection settings
    pub fn new(config: HttpConfig) -> Self {
        Self {
            config,
            observability_config: None,
            service_name: None,
        }
    }

    /// Initialize observability with this configuration on build
    pub fn with_observability(mut self, config: postrpc_core::ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Initialize observability with the default configuration on build
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(postrpc_core::ObservabilityConfig::default());
        self
    }

    /// Service name for telemetry, used only with observability enabled
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the client
    ///
    /// Does not contact the server; the first network traffic happens on the
    /// first call.
    pub fn build(self) -> Result<RpcClient> {
        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            // a second client in the same process finds the globals already set
            if let Err(e) = postrpc_core::init_observability(config.clone()) {
                tracing::warn!(error = %e, "Observability already initialized or unavailable");
            }

            Some(Arc::new(ClientMetrics::new(config.service_name)))
        } else {
            None
        };

        let transport = HttpTransport::new()?;

        tracing::debug!(
            host = %self.config.host,
            port = %self.config.port,
            tls = self.config.tls,
            "Client created"
        );

        Ok(RpcClient {
            config: self.config,
            transport,
            last_id: AtomicU64::new(0),
            metrics,
        })
    }
}
