//! Public API types: provider configuration, per-call overrides, and scored
//! inference results.

use serde::{Deserialize, Serialize};

/// The structured output format a provider is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    /// Structured JSON output. This is the default.
    #[default]
    Json,
    /// Structured YAML output.
    Yaml,
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Kind of decoding constraint attached to a provider.
///
/// None of the remote backends in this crate support constrained decoding, so
/// the only variant is [`ConstraintType::None`]; the type exists so callers
/// building prompts upstream can pass their constraint object through the
/// construction path without this core inspecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintType {
    /// No decoding constraint is applied.
    #[default]
    None,
}

/// Opaque schema constraint accepted at construction and never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Constraint {
    /// The kind of constraint. Always [`ConstraintType::None`] here.
    #[serde(default)]
    pub constraint_type: ConstraintType,
}

/// Default bound on concurrent in-flight requests during batch inference.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Configuration handed to a provider factory.
///
/// All fields are fixed once the factory consumes the config; the only state a
/// provider mutates after that point is its internal HTTP client handle, which
/// is built exactly once during construction.
///
/// # Example
///
/// ```rust
/// use structex::api::{FormatType, ProviderConfig};
///
/// let config = ProviderConfig::new("claude-sonnet-4-5")
///     .with_format(FormatType::Yaml)
///     .with_temperature(0.2)
///     .with_max_workers(4);
/// assert_eq!(config.max_workers, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model identifier understood by the backend (e.g. `"mistral-large-latest"`).
    pub model_id: String,
    /// API key. When `None`, the provider falls back to its backend-specific
    /// environment variable and fails construction if that is unset too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override for proxies or alternative endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Structured output format the model is instructed to produce.
    #[serde(default)]
    pub format: FormatType,
    /// Sampling temperature. Defaults to 0.0 (deterministic-leaning).
    #[serde(default)]
    pub temperature: f32,
    /// Upper bound on concurrent requests during batch inference. Defaults
    /// to [`DEFAULT_MAX_WORKERS`]; the effective pool is never larger than
    /// the batch itself.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// Per-request timeout in seconds applied to the HTTP client. `None`
    /// means no timeout: a hung call occupies its worker slot indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Schema constraint passed through from upstream. Ignored by every
    /// adapter in this crate.
    #[serde(default)]
    pub constraint: Constraint,
    /// Backend-specific extras. Unknown keys are ignored, not rejected, so
    /// callers can pass a superset of options shared across backends.
    #[serde(default)]
    pub extra: serde_json::Value,
}

fn default_max_workers() -> usize {
    DEFAULT_MAX_WORKERS
}

impl ProviderConfig {
    /// Create a config for `model_id` with every other field at its default.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            api_key: None,
            base_url: None,
            format: FormatType::default(),
            temperature: 0.0,
            max_workers: DEFAULT_MAX_WORKERS,
            request_timeout_secs: None,
            constraint: Constraint::default(),
            extra: serde_json::Value::Null,
        }
    }

    /// Set an explicit API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the backend's base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Select the structured output format.
    pub fn with_format(mut self, format: FormatType) -> Self {
        self.format = format;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Bound the number of concurrent in-flight requests for batches.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Apply a per-request timeout in seconds.
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Attach backend-specific extra options. Adapters ignore keys they do
    /// not understand.
    pub fn with_extra(mut self, extra: serde_json::Value) -> Self {
        self.extra = extra;
        self
    }
}

/// Per-call overrides layered on top of a provider's configured defaults.
///
/// Only the fields that are `Some` take effect; everything else falls back to
/// the instance default. An absent `top_p` is passed through unset on the wire
/// rather than being defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InferenceOptions {
    /// Sampling temperature override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum number of output tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Nucleus sampling threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

impl InferenceOptions {
    /// Merge these overrides onto `defaults`, producing the single effective
    /// configuration applied uniformly to every prompt in a batch.
    pub fn resolve(&self, defaults: &ProviderConfig) -> CallConfig {
        CallConfig {
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
        }
    }
}

/// The effective sampling configuration for one batch call, produced by
/// [`InferenceOptions::resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallConfig {
    /// Effective sampling temperature.
    pub temperature: f32,
    /// Maximum output tokens, when requested by the caller.
    pub max_output_tokens: Option<u32>,
    /// Nucleus sampling threshold, when requested by the caller.
    pub top_p: Option<f32>,
}

/// One inference result: the raw model output and a confidence score.
///
/// The score is the constant `1.0` for every successful call — none of the
/// backends wrapped here report a usable confidence, so callers must not
/// treat it as a probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOutput {
    /// Placeholder confidence score; always `1.0` from these backends.
    pub score: f32,
    /// Raw text payload returned by the model.
    pub output: String,
}

impl ScoredOutput {
    /// Wrap `output` with the fixed placeholder score.
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            score: 1.0,
            output: output.into(),
        }
    }
}
