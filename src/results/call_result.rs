//! Type-erased result of [`Client::execute`](crate::Client::execute).

use std::any::Any;
use std::fmt;

/// An instance of a generated response type, produced by one dispatch.
///
/// The concrete type is only known to the caller, who recovers it with
/// [`downcast`](Self::downcast) or [`downcast_ref`](Self::downcast_ref).
pub struct CallResult {
    type_name: String,
    value: Box<dyn Any + Send + Sync>,
}

impl CallResult {
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<String>, value: T) -> Self {
        Self {
            type_name: type_name.into(),
            value: Box::new(value),
        }
    }

    /// Fully-qualified name the value was resolved from.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the concrete value, or get the result back unchanged on mismatch.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Self> {
        let type_name = self.type_name;
        match self.value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self { type_name, value }),
        }
    }
}

impl fmt::Debug for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallResult")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
