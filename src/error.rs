use thiserror::Error;

/// Structured error context for configuration and dispatch failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Configuration key that caused the error (e.g., "connectwise.host")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the rejected value)
    pub details: Option<String>,
    /// Source of the error (e.g., "config_validator", "config_loader")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the client core.
///
/// Configuration problems surface at construction time and are always fatal
/// to construction. Dispatch problems surface from [`Client::execute`] and are
/// caller-fixable; neither is ever produced by the SOAP transport.
///
/// [`Client::execute`]: crate::Client::execute
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Unresolved call target: no response type registered as '{target}'")]
    UnresolvedCallTarget { target: String },

    #[error("Failed to construct '{target}' from call arguments: {message}")]
    Construction { target: String, message: String },

    #[error("No client has been constructed yet")]
    NotInitialized,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML syntax error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn unresolved(target: impl Into<String>) -> Self {
        Error::UnresolvedCallTarget {
            target: target.into(),
        }
    }

    pub fn construction(target: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Construction {
            target: target.into(),
            message: msg.into(),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration { .. })
    }

    pub fn is_unresolved_call_target(&self) -> bool {
        matches!(self, Error::UnresolvedCallTarget { .. })
    }
}
