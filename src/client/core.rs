use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::config::{ClientConfig, Credentials, SoapOptions};
use crate::registry::{self, Arguments, ResponseRegistry, NAMESPACE_SEPARATOR};
use crate::results::CallResult;
use crate::{Error, Result};

/// Namespace root of the generated API response types.
pub const DEFAULT_API_NAMESPACE: &str = "connectwise::api::generated";

/// Handle to a configured ConnectWise client.
///
/// Cloning is cheap and every clone refers to the same client: a namespace
/// change made through one clone is seen by all of them, including the
/// process-wide handle returned by [`Client::current`].
#[derive(Clone)]
pub struct Client {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) config: ClientConfig,
    pub(crate) api_namespace: RwLock<String>,
    pub(crate) registry: Arc<ResponseRegistry>,
}

impl Client {
    /// Create a client backed by the global response registry and install it
    /// as the process-wide current client.
    pub fn new(config: ClientConfig) -> Self {
        Self::builder().build_with(config)
    }

    /// Validate a configuration value (`{"connectwise": {...}, "soap_options": {...}}`)
    /// and create a client from it. Nothing is installed when validation fails.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(Self::new(ClientConfig::from_value(value)?))
    }

    pub fn builder() -> crate::client::builder::ClientBuilder {
        crate::client::builder::ClientBuilder::new()
    }

    /// The most recently constructed client.
    ///
    /// This exists for collaborators that cannot be handed a client
    /// explicitly; prefer passing the `Client` around.
    pub fn current() -> Result<Client> {
        crate::client::global::current()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The host exactly as configured.
    pub fn host(&self) -> &str {
        self.inner.config.host()
    }

    /// The host with `path` appended. Leading slashes on `path` are ignored,
    /// so `"some.uri"` and `"/some.uri"` give the same result; a path that is
    /// empty after stripping (such as `"/"`) yields the bare host.
    pub fn host_with(&self, path: &str) -> String {
        let host = self.host();
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return host.to_string();
        }
        format!("{}/{}", host.trim_end_matches('/'), path)
    }

    /// SOAP options for the transport, empty when none were configured.
    pub fn soap_options(&self) -> &SoapOptions {
        self.inner.config.soap_options()
    }

    pub fn credentials(&self) -> Credentials {
        self.inner.config.credentials()
    }

    /// Current namespace root for response type resolution.
    pub fn api_namespace(&self) -> String {
        self.namespace_guard().clone()
    }

    /// `leaf` qualified with the current namespace root.
    pub fn api_namespace_with(&self, leaf: &str) -> String {
        format!("{}{}{}", self.namespace_guard(), NAMESPACE_SEPARATOR, leaf)
    }

    /// Replace the namespace root used by later calls to [`execute`](Self::execute).
    ///
    /// The root is not checked against the registry. Callers sharing a client
    /// across threads must order this against their own `execute` calls.
    pub fn set_api_namespace(&self, root: impl Into<String>) -> &Self {
        let root = root.into();
        debug!(namespace = %root, "setting API namespace");
        match self.inner.api_namespace.write() {
            Ok(mut guard) => *guard = root,
            Err(poisoned) => *poisoned.into_inner() = root,
        }
        self
    }

    /// Resolve `<namespace>::<group>::<function>Response` in the registry and
    /// construct it from `arguments`.
    ///
    /// Performs no I/O. Fails with [`Error::UnresolvedCallTarget`] when no
    /// type is registered under the resolved name and with
    /// [`Error::Construction`] when the arguments do not fit the type.
    pub fn execute(&self, group: &str, function: &str, arguments: Arguments) -> Result<CallResult> {
        let target = registry::qualify(&self.api_namespace(), group, function);
        debug!(call_target = %target, arguments = arguments.len(), "dispatching call");

        let factory = self.inner.registry.resolve(&target).ok_or_else(|| {
            warn!(call_target = %target, "no response type registered for call");
            Error::unresolved(target.clone())
        })?;
        factory(target.as_str(), arguments)
    }

    /// Whether both handles refer to the same client.
    pub fn ptr_eq(&self, other: &Client) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn namespace_guard(&self) -> std::sync::RwLockReadGuard<'_, String> {
        self.inner
            .api_namespace
            .read()
            .unwrap_or_else(|e| e.into_inner())
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .field("api_namespace", &self.api_namespace())
            .field("registered", &self.inner.registry.len())
            .finish()
    }
}
