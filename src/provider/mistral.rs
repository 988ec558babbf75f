use crate::api::{CallConfig, ProviderConfig, ScoredOutput};
use crate::error::{ExtractError, Result};
use crate::provider::remote_common::{
    build_http_client, check_http_status, format_directive, resolve_api_key,
};
use crate::traits::LanguageModel;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const BACKEND: &str = "mistral";
const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";

/// Adapter for the [Mistral chat completions API](https://docs.mistral.ai/api/),
/// serving `mistral-*` model ids.
///
/// The credential is taken from the config or the `MISTRAL_API_KEY`
/// environment variable.
#[derive(Debug)]
pub struct MistralLanguageModel {
    client: Client,
    config: ProviderConfig,
    api_key: String,
    base_url: String,
}

/// Registry factory for `mistral-*` model ids.
pub fn factory(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(MistralLanguageModel::new(config)?))
}

impl MistralLanguageModel {
    /// Construct the adapter, resolving the credential and opening the HTTP
    /// client eagerly.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = resolve_api_key(&config, "Mistral", "MISTRAL_API_KEY")?;
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
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": prompt },
        ],
        "temperature": call.temperature,
    });
    if let Some(max_tokens) = call.max_output_tokens {
        body["max_tokens"] = json!(max_tokens);
    }
    if let Some(top_p) = call.top_p {
        body["top_p"] = json!(top_p);
    }
    body
}

#[async_trait]
impl LanguageModel for MistralLanguageModel {
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
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
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
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                ExtractError::inference_msg(BACKEND, "response contained no message content")
            })?;

        Ok(ScoredOutput::new(text))
    }
}
