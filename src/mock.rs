#![allow(dead_code)]

//! Mock language models for testing.
//!
//! Provides a configurable [`MockLanguageModel`] (failure injection,
//! artificial latency, call counting) plus factory functions with distinct
//! backend tags for registry resolution tests. Compiled only for tests.

use crate::api::{CallConfig, ProviderConfig, ScoredOutput};
use crate::error::{ExtractError, Result};
use crate::traits::LanguageModel;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

/// Mock model that echoes prompts back as `"<backend>:<prompt>"`.
#[derive(Debug)]
pub struct MockLanguageModel {
    backend: &'static str,
    config: ProviderConfig,
    delay_ms: u64,
    fail_on_marker: Option<String>,
    call_count: AtomicU32,
}

impl MockLanguageModel {
    pub fn new(backend: &'static str, config: ProviderConfig) -> Self {
        Self {
            backend,
            config,
            delay_ms: 0,
            fail_on_marker: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Sleep this long inside every `infer_single` call.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Fail any prompt containing `marker`.
    pub fn with_failure_on(mut self, marker: impl Into<String>) -> Self {
        self.fail_on_marker = Some(marker.into());
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    fn backend(&self) -> &'static str {
        self.backend
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn infer_single(&self, prompt: &str, _call: &CallConfig) -> Result<ScoredOutput> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }

        if let Some(marker) = &self.fail_on_marker
            && prompt.contains(marker.as_str())
        {
            return Err(ExtractError::inference_msg(
                self.backend,
                "mock backend failure",
            ));
        }

        Ok(ScoredOutput::new(format!("{}:{}", self.backend, prompt)))
    }
}

pub fn mock_factory_a(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(MockLanguageModel::new("mock-a", config)))
}

pub fn mock_factory_b(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(MockLanguageModel::new("mock-b", config)))
}

pub fn mock_factory_c(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(MockLanguageModel::new("mock-c", config)))
}
