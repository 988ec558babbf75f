use crate::api::{CallConfig, ProviderConfig, ScoredOutput};
use crate::error::{ExtractError, Result};
use crate::provider::remote_common::{
    build_http_client, check_http_status, format_directive, resolve_api_key,
};
use crate::traits::LanguageModel;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const XAI_BASE_URL: &str = "https://api.x.ai";

/// Adapter for the chat completions wire format shared by OpenAI and
/// OpenAI-compatible endpoints. One struct serves two registrations:
/// `gpt-*` against api.openai.com and `grok-*` against api.x.ai, differing
/// only in default base URL and credential source.
#[derive(Debug)]
pub struct OpenAiCompatLanguageModel {
    client: Client,
    config: ProviderConfig,
    backend: &'static str,
    api_key: String,
    base_url: String,
}

/// Registry factory for `gpt-*` model ids.
pub fn factory(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(OpenAiCompatLanguageModel::new(
        config,
        "openai",
        "OPENAI_API_KEY",
        OPENAI_BASE_URL,
    )?))
}

/// Registry factory for `grok-*` model ids, pointed at the xAI endpoint.
pub fn grok_factory(config: ProviderConfig) -> Result<Box<dyn LanguageModel>> {
    Ok(Box::new(OpenAiCompatLanguageModel::new(
        config,
        "xai",
        "XAI_API_KEY",
        XAI_BASE_URL,
    )?))
}

impl OpenAiCompatLanguageModel {
    fn new(
        config: ProviderConfig,
        backend: &'static str,
        env_var: &str,
        default_base_url: &str,
    ) -> Result<Self> {
        let api_key = resolve_api_key(&config, backend, env_var)?;
        let client = build_http_client(&config)?;
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url.to_string());

        Ok(Self {
            client,
            config,
            backend,
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
impl LanguageModel for OpenAiCompatLanguageModel {
    fn backend(&self) -> &'static str {
        self.backend
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
            .map_err(|e| ExtractError::inference(self.backend, "request failed", e))?;

        let body: serde_json::Value = check_http_status(self.backend, response)
            .await?
            .json()
            .await
            .map_err(|e| {
                ExtractError::inference(self.backend, "failed to decode response body", e)
            })?;

        let text = body
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                ExtractError::inference_msg(self.backend, "response contained no message content")
            })?;

        Ok(ScoredOutput::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENV_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

    #[tokio::test]
    async fn openai_and_grok_factories_differ_in_endpoint_and_tag() {
        let _lock = ENV_LOCK.lock().await;

        let gpt = OpenAiCompatLanguageModel::new(
            ProviderConfig::new("gpt-4o").with_api_key("k"),
            "openai",
            "OPENAI_API_KEY",
            OPENAI_BASE_URL,
        )
        .unwrap();
        let grok = OpenAiCompatLanguageModel::new(
            ProviderConfig::new("grok-beta").with_api_key("k"),
            "xai",
            "XAI_API_KEY",
            XAI_BASE_URL,
        )
        .unwrap();

        assert_eq!(gpt.backend(), "openai");
        assert_eq!(gpt.base_url, OPENAI_BASE_URL);
        assert_eq!(grok.backend(), "xai");
        assert_eq!(grok.base_url, XAI_BASE_URL);
    }

    #[tokio::test]
    async fn grok_reads_the_xai_environment_variable() {
        let _lock = ENV_LOCK.lock().await;
        // SAFETY: protected by ENV_LOCK
        unsafe { std::env::set_var("XAI_API_KEY", "xai-test-key") };

        let model = grok_factory(ProviderConfig::new("grok-beta")).unwrap();
        assert_eq!(model.backend(), "xai");

        // SAFETY: protected by ENV_LOCK
        unsafe { std::env::remove_var("XAI_API_KEY") };
    }

    #[tokio::test]
    async fn construction_without_credential_fails_before_any_network_call() {
        let _lock = ENV_LOCK.lock().await;
        // SAFETY: protected by ENV_LOCK
        unsafe { std::env::remove_var("OPENAI_API_KEY") };

        let err = factory(ProviderConfig::new("gpt-4o")).unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn payload_shape_matches_chat_completions() {
        let call = CallConfig {
            temperature: 0.0,
            max_output_tokens: Some(64),
            top_p: None,
        };
        let payload = build_payload("gpt-4o", "sys", "hello", &call);
        assert_eq!(payload["model"], "gpt-4o");
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["max_tokens"], 64);
        assert!(payload.get("top_p").is_none());
    }
}
