//! Crate-level error types.
//!
//! [`BookdeskError`] unifies every error source (configuration, HTTP,
//! JSON, terminal I/O, collaborator rejections) behind a single enum so
//! callers can match on the variant they care about while still using
//! the `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BookdeskError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum BookdeskError {
    /// A configuration value was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// An HTTP request could not be sent or its body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The collaborator rejected a request with a non-success status.
    ///
    /// `message` carries the structured `{error}` body when one was sent,
    /// otherwise a generic description of the status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Terminal setup, teardown, or drawing failed.
    #[error("terminal error: {0}")]
    Io(String),
}
