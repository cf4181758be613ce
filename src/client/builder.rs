use std::sync::{Arc, RwLock};

use tracing::info;

use crate::client::core::{Client, ClientInner, DEFAULT_API_NAMESPACE};
use crate::config::ClientConfig;
use crate::registry::ResponseRegistry;
use crate::{Error, ErrorContext, Result};

/// Builder for creating clients with a custom registry or namespace root.
///
/// Keep this surface area small: everything the remote API needs is in the
/// [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    registry: Option<Arc<ResponseRegistry>>,
    api_namespace: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolve call targets against `registry` instead of the global one.
    pub fn registry(mut self, registry: Arc<ResponseRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Start from a namespace root other than [`DEFAULT_API_NAMESPACE`].
    pub fn api_namespace(mut self, root: impl Into<String>) -> Self {
        self.api_namespace = Some(root.into());
        self
    }

    /// Build the client and install it as the process-wide current client.
    pub fn build(mut self) -> Result<Client> {
        let Some(config) = self.config.take() else {
            return Err(Error::configuration_with_context(
                "no configuration supplied",
                ErrorContext::new().with_source("client_builder"),
            ));
        };
        Ok(self.build_with(config))
    }

    pub(crate) fn build_with(self, config: ClientConfig) -> Client {
        let registry = self
            .registry
            .unwrap_or_else(crate::registry::global_registry);
        let api_namespace = self
            .api_namespace
            .unwrap_or_else(|| DEFAULT_API_NAMESPACE.to_string());

        info!(
            host = %config.host(),
            company = %config.company(),
            namespace = %api_namespace,
            "ConnectWise client constructed"
        );

        let client = Client {
            inner: Arc::new(ClientInner {
                config,
                api_namespace: RwLock::new(api_namespace),
                registry,
            }),
        };
        crate::client::global::install(&client);
        client
    }
}
