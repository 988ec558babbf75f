use crate::api::{CallConfig, ProviderConfig, ScoredOutput};
use crate::error::{ExtractError, Result};
use crate::provider::remote_common::{
    build_http_client, check_http_status, format_directive, resolve_api_key,
};
use crate::traits::LanguageModel;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const BACKEND: &str = "anthropic";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// The Messages API requires `max_tokens`; this is the fallback when the
/// caller does not override it.
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Adapter for the [Anthropic Messages API](https://docs.anthropic.com/en/api/messages),
/// serving `claude-*` model ids.
///
/// The credential is taken from the config or the `ANTHROPIC_API_KEY`
/// environment variable.
#[derive(Debug)]
pub struct AnthropicLanguageModel {
    client: Client,
    config: ProviderConfig,
    api_key: String,
    base_url: String,
}

/// Registry factory for `claude-*` model ids.
pub fn factory(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(AnthropicLanguageModel::new(config)?))
}

impl AnthropicLanguageModel {
    /// Construct the adapter, resolving the credential and opening the HTTP
    /// client eagerly. Fails with [`ExtractError::Config`] before any network
    /// call when no credential is available.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = resolve_api_key(&config, "Anthropic", "ANTHROPIC_API_KEY")?;
        let client = build_http_client(&config)?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            config,
            api_key,
            base_url,
        })
    }
}

fn build_payload(
    model_id: &str,
    system: &str,
    prompt: &str,
    call: &CallConfig,
) -> serde_json::Value {
    let mut body = json!({
        "model": model_id,
        "max_tokens": call.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        "system": system,
        "messages": [{ "role": "user", "content": prompt }],
        "temperature": call.temperature,
    });
    if let Some(top_p) = call.top_p {
        body["top_p"] = json!(top_p);
    }
    body
}

#[async_trait]
impl LanguageModel for AnthropicLanguageModel {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn infer_single(&self, prompt: &str, call: &CallConfig) -> Result<ScoredOutput> {
        let system = format_directive(self.config.format);
        let body = build_payload(&self.config.model_id, system, prompt, call);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ExtractError::inference(BACKEND, "request failed", e))?;

        let body: serde_json::Value = check_http_status(BACKEND, response)
            .await?
            .json()
            .await
            .map_err(|e| ExtractError::inference(BACKEND, "failed to decode response body", e))?;

        let text = body
            .get("content")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|item| item.get("text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                ExtractError::inference_msg(BACKEND, "response contained no text content")
            })?;

        Ok(ScoredOutput::new(text))
    }
}
