//! Error types for event loading, configuration and summary requests.
//!
//! The aggregation engine itself never fails: missing optional fields fall back
//! to defaults and unknown window modes exclude everything. Errors only arise
//! at the edges, when events are parsed, sources are read, configuration is
//! loaded, or a request names something that does not exist.

use std::fmt;

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Structured context for dashboard errors.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "fetch_events", "load_config")
    pub operation: Option<String>,
    /// File path, source name or request field involved
    pub target: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the target (path, source or field name).
    pub fn with_target(mut self, target: impl ToString) -> Self {
        self.target = Some(target.to_string());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none() && self.target.is_none() && self.details.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref target) = self.target {
            parts.push(format!("target={}", target));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for dashboard operations
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Event payload could not be decoded into event records.
    #[error("Parse error: {message} {context}")]
    Parse {
        message: String,
        context: ErrorContext,
    },

    /// The event source could not deliver events.
    #[error("Source error: {message} {context}")]
    Source {
        message: String,
        context: ErrorContext,
    },

    /// Configuration file or environment value is invalid.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// A request named an unknown filter, chart or mode.
    #[error("Invalid request: {message} {context}")]
    InvalidRequest {
        message: String,
        context: ErrorContext,
    },
}

impl DashboardError {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a parse error with context.
    pub fn parse_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Parse {
            message: message.into(),
            context,
        }
    }

    /// Create a source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a source error with context.
    pub fn source_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Source {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error with context.
    pub fn configuration_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Configuration {
            message: message.into(),
            context,
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Parse { context, .. }
            | Self::Source { context, .. }
            | Self::Configuration { context, .. }
            | Self::InvalidRequest { context, .. } => context,
        }
    }

    /// Whether the caller, rather than the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. } | Self::Parse { .. })
    }
}
