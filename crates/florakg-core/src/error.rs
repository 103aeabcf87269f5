//! Centralized error types for florakg.

use thiserror::Error;

/// Main error type for florakg operations.
#[derive(Error, Debug)]
pub enum FloraError {
    #[error("Plant not found: {0}")]
    EntityNotFound(String),

    #[error("Alias '{alias}' points to '{target}', which is not in the knowledge base")]
    AliasUnresolvable { alias: String, target: String },

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Completion service failure: {0}")]
    CompletionServiceFailure(#[from] CompletionError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for florakg operations.
pub type FloraResult<T> = Result<T, FloraError>;

impl FloraError {
    /// Create a store-unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Failure of the external text-completion service.
///
/// `Display` stays short and never includes response bodies or credentials;
/// callers log the detail separately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("request timed out")]
    Timeout,

    #[error("authentication rejected")]
    Unauthorized,

    #[error("rate limited")]
    RateLimited,

    #[error("upstream returned HTTP {status}")]
    Http { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("completion service is not configured")]
    NotConfigured,
}
