//! Backend adapters implementing the [`LanguageModel`](crate::traits::LanguageModel)
//! contract.
//!
//! Each sub-module is gated behind a Cargo feature flag; only adapters whose
//! features are enabled will be compiled and registered by
//! [`register_default_providers`](crate::registry::register_default_providers).
//!
//! | Module | Feature | API | Model id patterns |
//! |--------|---------|-----|-------------------|
//! | `anthropic` | `provider-anthropic` | Anthropic Messages | `^claude-` |
//! | `mistral` | `provider-mistral` | Mistral chat completions | `^mistral-` |
//! | `openai` | `provider-openai` | OpenAI-compatible chat completions | `^gpt-`, `^grok-` |

#[cfg(any(
    feature = "provider-anthropic",
    feature = "provider-mistral",
    feature = "provider-openai",
))]
pub(crate) mod remote_common;

#[cfg(feature = "provider-anthropic")]
pub mod anthropic;

#[cfg(feature = "provider-mistral")]
pub mod mistral;

#[cfg(feature = "provider-openai")]
pub mod openai;

// Re-exports (same order as module declarations above).
#[cfg(feature = "provider-anthropic")]
pub use anthropic::AnthropicLanguageModel;

#[cfg(feature = "provider-mistral")]
pub use mistral::MistralLanguageModel;

#[cfg(feature = "provider-openai")]
pub use openai::OpenAiCompatLanguageModel;
