//! Shared utilities for the remote HTTP adapters: client construction,
//! credential resolution, HTTP status mapping, and the structured-output
//! directive.

use crate::api::{FormatType, ProviderConfig};
use crate::error::{ExtractError, Result};
use reqwest::Client;
use std::time::Duration;

/// Build the per-instance HTTP client, applying the configured request
/// timeout. Construction failure is a configuration error: it is detected
/// before any prompt is submitted.
pub(crate) fn build_http_client(config: &ProviderConfig) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| ExtractError::Config(format!("failed to build HTTP client: {e}")))
}

/// Resolve the credential for a backend: an explicit key on the config wins,
/// otherwise the backend's environment variable is consulted. Empty strings
/// count as unset.
pub(crate) fn resolve_api_key(
    config: &ProviderConfig,
    backend: &str,
    env_var: &str,
) -> Result<String> {
    if let Some(key) = &config.api_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var(env_var)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            ExtractError::Config(format!(
                "API key not provided for {backend} and {env_var} is not set"
            ))
        })
}

/// Map a non-success HTTP response to an inference error carrying the status
/// and a bounded body snippet. Returns the response unchanged on 2xx.
pub(crate) async fn check_http_status(
    backend: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(200).collect();
    Err(ExtractError::inference_msg(
        backend,
        format!("HTTP {status}: {snippet}"),
    ))
}

/// The fixed system-level directive naming the expected output format,
/// prepended to every prompt.
pub(crate) fn format_directive(format: FormatType) -> &'static str {
    match format {
        FormatType::Json => "You are a helpful assistant that responds in JSON format.",
        FormatType::Yaml => "You are a helpful assistant that responds in YAML format.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static ENV_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

    #[tokio::test]
    async fn explicit_key_wins_over_environment() {
        let _lock = ENV_LOCK.lock().await;
        // SAFETY: protected by ENV_LOCK
        unsafe { std::env::set_var("STRUCTEX_TEST_KEY", "from-env") };

        let config = ProviderConfig::new("foo-1").with_api_key("from-config");
        let key = resolve_api_key(&config, "Test", "STRUCTEX_TEST_KEY").unwrap();
        assert_eq!(key, "from-config");

        // SAFETY: protected by ENV_LOCK
        unsafe { std::env::remove_var("STRUCTEX_TEST_KEY") };
    }

    #[tokio::test]
    async fn missing_key_and_env_is_a_config_error() {
        let _lock = ENV_LOCK.lock().await;
        // SAFETY: protected by ENV_LOCK
        unsafe { std::env::remove_var("STRUCTEX_TEST_KEY") };

        let config = ProviderConfig::new("foo-1");
        let err = resolve_api_key(&config, "Test", "STRUCTEX_TEST_KEY").unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
        assert!(err.to_string().contains("STRUCTEX_TEST_KEY"));
    }

    #[tokio::test]
    async fn empty_explicit_key_falls_back_to_environment() {
        let _lock = ENV_LOCK.lock().await;
        // SAFETY: protected by ENV_LOCK
        unsafe { std::env::set_var("STRUCTEX_TEST_KEY", "from-env") };

        let config = ProviderConfig::new("foo-1").with_api_key("");
        let key = resolve_api_key(&config, "Test", "STRUCTEX_TEST_KEY").unwrap();
        assert_eq!(key, "from-env");

        // SAFETY: protected by ENV_LOCK
        unsafe { std::env::remove_var("STRUCTEX_TEST_KEY") };
    }

    #[test]
    fn directive_names_the_configured_format() {
        assert!(format_directive(FormatType::Json).contains("JSON"));
        assert!(format_directive(FormatType::Yaml).contains("YAML"));
    }
}
