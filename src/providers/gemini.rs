use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::config::ProviderSettings;
use crate::providers::{expect_success, CompletionProvider, ProviderError, REQUEST_TIMEOUT};

const PROVIDER_ID: &str = "gemini";
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini generateContent. The thinking budget is pinned to zero so
/// the model skips extended reasoning and answers with lower latency.
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl GeminiProvider {
    pub fn from_settings(
        http: reqwest::Client,
        settings: &ProviderSettings,
    ) -> Result<Self, ProviderError> {
        let api_key = settings
            .gemini_api_key
            .as_ref()
            .ok_or(ProviderError::MissingCredential {
                provider: PROVIDER_ID,
            })?;

        Ok(Self {
            http,
            api_key: api_key.clone(),
            model: settings.gemini_model.clone(),
        })
    }
}

fn extract_candidate_text(value: &Value) -> Result<String, ProviderError> {
    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(|text| text.as_str())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::api(PROVIDER_ID, "response contained no candidate text"))
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        log::info!("Using Gemini API with model {}", self.model);

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "thinkingConfig": { "thinkingBudget": 0 }
            },
        });

        let response = self
            .http
            .post(format!("{}/models/{}:generateContent", API_BASE, self.model))
            .timeout(REQUEST_TIMEOUT)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER_ID, e))?;

        let value: Value = expect_success(PROVIDER_ID, response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::api(PROVIDER_ID, format!("invalid response body: {}", e)))?;

        extract_candidate_text(&value)
    }
}
