use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::config::ProviderSettings;
use crate::providers::{
    expect_success, CompletionProvider, ProviderError, MAX_COMPLETION_TOKENS, REQUEST_TIMEOUT,
};

const PROVIDER_ID: &str = "huggingface";
const API_BASE: &str = "https://api-inference.huggingface.co/models";

/// Hugging Face hosted inference. The text-generation endpoint answers
/// with a list of generations; the first one is unwrapped.
pub struct HuggingFaceProvider {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
}

impl HuggingFaceProvider {
    pub fn from_settings(
        http: reqwest::Client,
        settings: &ProviderSettings,
    ) -> Result<Self, ProviderError> {
        let api_key = settings
            .huggingface_api_key
            .as_ref()
            .ok_or(ProviderError::MissingCredential {
                provider: PROVIDER_ID,
            })?;

        Ok(Self {
            http,
            api_key: api_key.clone(),
            model: settings.huggingface_model.clone(),
        })
    }
}

/// First generation's text when the response is the usual list shape,
/// otherwise the raw JSON stringified so the parser still has something to
/// chew on.
fn extract_generated_text(value: &Value) -> String {
    match value.as_array().and_then(|generations| generations.first()) {
        Some(first) => first
            .get("generated_text")
            .and_then(|text| text.as_str())
            .unwrap_or("No response generated.")
            .to_string(),
        None => value.to_string(),
    }
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        log::info!("Using Hugging Face API with model {}", self.model);

        let body = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": MAX_COMPLETION_TOKENS,
                "temperature": 0.7,
            },
        });

        let response = self
            .http
            .post(format!("{}/{}", API_BASE, self.model))
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::transport(PROVIDER_ID, e))?;

        let value: Value = expect_success(PROVIDER_ID, response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::api(PROVIDER_ID, format!("invalid response body: {}", e)))?;

        Ok(extract_generated_text(&value))
    }
}
