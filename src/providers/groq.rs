use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::config::ProviderSettings;
use crate::providers::{
    expect_success, ChatCompletionEnvelope, CompletionProvider, ProviderError,
    MAX_COMPLETION_TOKENS, REQUEST_TIMEOUT,
};

const PROVIDER_ID: &str = "groq";
const ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Groq inference. OpenAI-compatible chat-completions schema on Groq's own
/// endpoint.
pub struct GroqProvider {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl GroqProvider {
    pub fn from_settings(
        http: reqwest::Client,
        settings: &ProviderSettings,
    ) -> Result<Self, ProviderError> {
        let api_key = settings
            .groq_api_key
            .as_ref()
            .ok_or(ProviderError::MissingCredential {
                provider: PROVIDER_ID,
            })?;

        Ok(Self {
            http,
            api_key: api_key.clone(),
            model: settings.groq_model.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        log::info!("Using Groq API with model {}", self.model);

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .http
            .post(ENDPOINT)
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER_ID, e))?;

        let envelope: ChatCompletionEnvelope = expect_success(PROVIDER_ID, response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::api(PROVIDER_ID, format!("invalid response envelope: {}", e)))?;

        envelope.into_text(PROVIDER_ID)
    }
}
