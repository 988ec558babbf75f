//! Process-wide registry mapping model-id patterns to provider factories.
//!
//! Each backend registers one entry: a set of regex patterns over model-id
//! strings, a priority, and a factory. Resolution scans all entries whose
//! patterns match the requested id and picks the winner by priority, breaking
//! ties in favor of the most recent registration. Both rules together make
//! resolution deterministic for a given registration history.

use crate::api::ProviderConfig;
use crate::error::{ExtractError, Result};
use crate::traits::LanguageModel;
use regex::Regex;
use std::sync::{LazyLock, RwLock};

/// Constructor for a provider instance. Consumes the resolved configuration
/// and eagerly opens the backend client.
pub type ProviderFactory = fn(ProviderConfig) -> Result<Box<dyn LanguageModel>>;

struct RegistryEntry {
    patterns: Vec<Regex>,
    priority: i32,
    factory: ProviderFactory,
}

impl RegistryEntry {
    /// Patterns use Python `re.match` semantics: the match must begin at the
    /// start of the model id, whether or not the pattern carries a `^` anchor.
    fn matches(&self, model_id: &str) -> bool {
        self.patterns
            .iter()
            .any(|re| re.find(model_id).is_some_and(|m| m.start() == 0))
    }
}

/// Registry of provider factories keyed by model-id patterns.
///
/// Entries are append-only: registration happens during initialization, after
/// which the entry list is read-mostly. Concurrent resolution is safe; the
/// interior `RwLock` is only write-held for the duration of an append.
pub struct Registry {
    entries: RwLock<Vec<RegistryEntry>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Create a registry pre-populated with every backend compiled into this
    /// build via [`register_default_providers`].
    pub fn with_default_providers() -> Result<Self> {
        let registry = Self::new();
        register_default_providers(&registry)?;
        Ok(registry)
    }

    /// Register a provider factory for the given patterns and priority.
    ///
    /// Fails with [`ExtractError::Config`] when `patterns` is empty or any
    /// pattern does not compile. Entries are immutable once added; there is
    /// no deregistration.
    pub fn register(
        &self,
        patterns: &[&str],
        priority: i32,
        factory: ProviderFactory,
    ) -> Result<()> {
        if patterns.is_empty() {
            return Err(ExtractError::Config(
                "provider registration requires at least one pattern".to_string(),
            ));
        }

        let compiled = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    ExtractError::Config(format!("invalid provider pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(patterns = ?patterns, priority, "registering provider");
        self.entries.write().unwrap().push(RegistryEntry {
            patterns: compiled,
            priority,
            factory,
        });
        Ok(())
    }

    /// Resolve `model_id` to the factory of the highest-priority matching
    /// entry; among equal priorities the most recently registered entry wins.
    ///
    /// Fails with [`ExtractError::NoProvider`] when no entry matches.
    pub fn resolve(&self, model_id: &str) -> Result<ProviderFactory> {
        let entries = self.entries.read().unwrap();
        entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches(model_id))
            .max_by_key(|(seq, entry)| (entry.priority, *seq))
            .map(|(_, entry)| entry.factory)
            .ok_or_else(|| ExtractError::NoProvider(model_id.to_string()))
    }

    /// Read-only snapshot of `(pattern strings, priority)` per entry, in
    /// registration order.
    pub fn list_entries(&self) -> Vec<(Vec<String>, i32)> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .map(|entry| {
                (
                    entry.patterns.iter().map(|re| re.as_str().to_string()).collect(),
                    entry.priority,
                )
            })
            .collect()
    }
}

/// Register every backend compiled into this build.
///
/// One explicit call per backend, so the full set of registrations is visible
/// in one place and testable against a caller-owned [`Registry`]. All
/// built-in backends register at priority 10; callers claiming the same id
/// families should register above that.
pub fn register_default_providers(registry: &Registry) -> Result<()> {
    #[cfg(feature = "provider-anthropic")]
    registry.register(&[r"^claude-"], 10, crate::provider::anthropic::factory)?;

    #[cfg(feature = "provider-mistral")]
    registry.register(&[r"^mistral-"], 10, crate::provider::mistral::factory)?;

    #[cfg(feature = "provider-openai")]
    {
        registry.register(&[r"^gpt-"], 10, crate::provider::openai::factory)?;
        registry.register(&[r"^grok-"], 10, crate::provider::openai::grok_factory)?;
    }

    // Silence the unused binding when no provider feature is enabled.
    let _ = registry;
    Ok(())
}

static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    // Built-in patterns are literals validated by the registry tests.
    Registry::with_default_providers().expect("built-in provider patterns compile")
});

/// The process-wide registry holding all built-in backends. Initialized on
/// first use and alive for the process lifetime.
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Resolve `config.model_id` against the default registry and construct the
/// provider instance.
pub fn create_model(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    let factory = default_registry().resolve(&config.model_id)?;
    factory(config)
}
