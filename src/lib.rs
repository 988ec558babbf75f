//! Structured information extraction from text over interchangeable LLM backends.
//!
//! structex lets callers run extraction prompts against any of several remote
//! language-model backends, selected by nothing more than a model identifier
//! string. Two pieces make that work:
//!
//! - **[`Registry`](registry::Registry)** — a process-wide table of
//!   `(patterns, priority, factory)` entries. Resolving a model id scans all
//!   entries whose regex patterns match and picks the winner by priority,
//!   breaking ties toward the most recent registration.
//! - **[`LanguageModel`](traits::LanguageModel)** — the uniform inference
//!   contract every backend adapter implements: accept an ordered batch of
//!   prompts, execute them with bounded parallelism, and yield exactly one
//!   scored result per prompt, in input order, translating backend failures
//!   into the crate's error taxonomy.
//!
//! Prompt construction, schema enforcement, persistence, and visualization
//! live upstream; this crate only moves prompts to backends and results back.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use structex::api::{InferenceOptions, ProviderConfig};
//! use structex::registry::create_model;
//! use structex::traits::LanguageModel;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let model = create_model(
//!     ProviderConfig::new("claude-sonnet-4-5")
//!         .with_temperature(0.0)
//!         .with_max_workers(8),
//! )?;
//!
//! let prompts = vec![
//!     "Extract all person names from: Ada Lovelace met Charles Babbage.".to_string(),
//!     "Extract all person names from: Grace Hopper wrote the compiler.".to_string(),
//! ];
//! let outputs = model.infer(&prompts, &InferenceOptions::default()).await?;
//!
//! assert_eq!(outputs.len(), prompts.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod provider;
pub mod registry;
pub mod traits;

mod batch;

#[cfg(test)]
mod mock;
