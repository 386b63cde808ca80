use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::config::ProviderSettings;
use crate::providers::{
    CompletionProvider, ProviderError, MAX_COMPLETION_TOKENS, REQUEST_TIMEOUT,
};

const PROVIDER_ID: &str = "openai";

/// OpenAI chat completions through the async-openai client, using its
/// bring-your-own-types surface so the request body mirrors the wire
/// format. The SDK owns its HTTP stack, so the fixed call bound is
/// enforced from outside with a tokio timeout.
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiProvider {
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let api_key = settings
            .openai_api_key
            .as_ref()
            .ok_or(ProviderError::MissingCredential {
                provider: PROVIDER_ID,
            })?;

        let config = OpenAIConfig::new().with_api_key(api_key.expose_secret());

        Ok(Self {
            client: Client::with_config(config),
            model: settings.openai_model.clone(),
        })
    }
}

fn extract_message_content(value: &Value) -> Result<String, ProviderError> {
    value
        .pointer("/choices/0/message/content")
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::api(PROVIDER_ID, "response contained no message content"))
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        log::info!("Using OpenAI API with model {}", self.model);

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response: Value =
            tokio::time::timeout(REQUEST_TIMEOUT, self.client.chat().create_byot(body))
                .await
                .map_err(|_| ProviderError::timeout(PROVIDER_ID))?
                .map_err(|e| ProviderError::api(PROVIDER_ID, e.to_string()))?;

        extract_message_content(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_reported_on_construction() {
        let settings = ProviderSettings::without_credentials();
        let result = OpenAiProvider::from_settings(&settings);

        assert!(matches!(
            result,
            Err(ProviderError::MissingCredential { provider: "openai" })
        ));
    }

    #[test]
    fn test_provider_id() {
        let provider = OpenAiProvider::from_settings(&ProviderSettings::test_settings())
            .expect("key configured");
        assert_eq!(provider.id(), "openai");
    }

    #[test]
    fn test_extracts_first_choice_content() {
        let value = json!({
            "choices": [
                { "message": { "content": "the analysis" } },
                { "message": { "content": "a second choice" } }
            ]
        });
        assert_eq!(extract_message_content(&value).expect("content"), "the analysis");
    }

    #[test]
    fn test_empty_choices_is_an_api_error() {
        let value = json!({ "choices": [] });
        assert!(matches!(
            extract_message_content(&value),
            Err(ProviderError::Api { provider: "openai", .. })
        ));
    }
}
