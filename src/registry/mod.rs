//! Call-target registry: maps qualified response type names to factories.
//!
//! Generated response types are registered under
//! `<namespace root>::<Group>::<Function>Response`, the same three-part name
//! [`Client::execute`](crate::Client::execute) builds at dispatch time. The
//! registry replaces reflective class lookup with a static table that code
//! generators populate at startup.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::results::CallResult;
use crate::{Error, Result};

/// Named call arguments.
pub type Arguments = serde_json::Map<String, serde_json::Value>;

/// Builds a response value from call arguments. Receives the qualified name
/// it was registered under.
pub type ResponseFactory = Arc<dyn Fn(&str, Arguments) -> Result<CallResult> + Send + Sync>;

/// Separator between segments of a qualified type name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Suffix appended to a function name to name its response type.
pub const RESPONSE_SUFFIX: &str = "Response";

/// Join a namespace root, an API group and a function into the qualified
/// name of the function's response type.
pub fn qualify(root: &str, group: &str, function: &str) -> String {
    format!(
        "{root}{sep}{group}{sep}{function}{RESPONSE_SUFFIX}",
        sep = NAMESPACE_SEPARATOR
    )
}

/// Registry of constructible response types.
pub struct ResponseRegistry {
    factories: RwLock<HashMap<String, ResponseFactory>>,
}

impl ResponseRegistry {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Register `T` as the response type of `group`/`function` under
    /// `namespace`. `T` is built by deserializing the call arguments.
    pub fn register<T>(&self, namespace: &str, group: &str, function: &str) -> &Self
    where
        T: DeserializeOwned + Any + Send + Sync,
    {
        let factory: ResponseFactory = Arc::new(|name: &str, arguments: Arguments| -> Result<CallResult> {
            let value: T = serde_json::from_value(serde_json::Value::Object(arguments))
                .map_err(|e| Error::construction(name, e.to_string()))?;
            Ok(CallResult::new(name, value))
        });
        self.register_factory(qualify(namespace, group, function), factory)
    }

    /// Register a factory under an already-qualified name, replacing any
    /// previous entry.
    pub fn register_factory(&self, qualified_name: impl Into<String>, factory: ResponseFactory) -> &Self {
        let qualified_name = qualified_name.into();
        debug!(name = %qualified_name, "registering response type");
        self.write().insert(qualified_name, factory);
        self
    }

    pub fn resolve(&self, qualified_name: &str) -> Option<ResponseFactory> {
        self.read().get(qualified_name).cloned()
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.read().contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered names, sorted.
    pub fn qualified_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    // A panicking registrant cannot leave the map half-written, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, ResponseFactory>> {
        self.factories.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, ResponseFactory>> {
        self.factories.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ResponseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseRegistry")
            .field("qualified_names", &self.qualified_names())
            .finish()
    }
}

static GLOBAL_REGISTRY: Lazy<Arc<ResponseRegistry>> =
    Lazy::new(|| Arc::new(ResponseRegistry::new()));

/// Process-wide registry used by clients that are not given their own.
pub fn global_registry() -> Arc<ResponseRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}
