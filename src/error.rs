//! Error types for the structex core.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Unified error type covering configuration, provider resolution, and
/// inference failures.
///
/// The taxonomy is deliberately small: callers match on the failure *class*
/// (fatal configuration problem, no provider for a model id, failed batch)
/// rather than on backend-specific details, which live in the message and the
/// preserved source error.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Invalid or missing configuration: no credential available, an empty or
    /// malformed pattern set at registration, or an HTTP client that could not
    /// be constructed. Never retried; surfaced before any network call.
    #[error("configuration error: {0}")]
    Config(String),

    /// No registered provider pattern matched the requested model id.
    #[error("no provider registered for model id '{0}'")]
    NoProvider(String),

    /// A remote call or result aggregation failed during a batch `infer`.
    /// Fatal for the enclosing batch: no partial results are returned.
    #[error("{backend} inference error: {message}")]
    Inference {
        /// Short tag identifying the backend (e.g. `"anthropic"`).
        backend: &'static str,
        /// Human-readable description of the failure.
        message: String,
        /// The underlying error, when one exists (HTTP transport errors,
        /// body decode failures). `None` for aggregation-level failures.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ExtractError {
    /// Build an [`ExtractError::Inference`] carrying an underlying cause.
    pub fn inference(
        backend: &'static str,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            backend,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build an [`ExtractError::Inference`] with no underlying cause, for
    /// failures that originate inside this crate (e.g. a missing result slot).
    pub fn inference_msg(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Inference {
            backend,
            message: message.into(),
            source: None,
        }
    }
}
