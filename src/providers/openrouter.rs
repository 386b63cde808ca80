use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::config::ProviderSettings;
use crate::providers::{
    expect_success, ChatCompletionEnvelope, CompletionProvider, ProviderError,
    MAX_COMPLETION_TOKENS, REQUEST_TIMEOUT,
};

const PROVIDER_ID: &str = "openrouter";
const ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// OpenRouter multi-model proxy. Speaks the OpenAI chat-completions schema
/// and carries the site attribution headers OpenRouter uses for rankings.
pub struct OpenRouterProvider {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
    site_url: String,
    site_name: String,
}

impl OpenRouterProvider {
    pub fn from_settings(
        http: reqwest::Client,
        settings: &ProviderSettings,
    ) -> Result<Self, ProviderError> {
        let api_key = settings
            .openrouter_api_key
            .as_ref()
            .ok_or(ProviderError::MissingCredential {
                provider: PROVIDER_ID,
            })?;

        Ok(Self {
            http,
            api_key: api_key.clone(),
            model: settings.openrouter_model.clone(),
            site_url: settings.openrouter_site_url.clone(),
            site_name: settings.openrouter_site_name.clone(),
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        log::info!("Using OpenRouter API with model {}", self.model);

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
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", &self.site_name)
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
