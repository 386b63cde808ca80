pub mod gemini;
pub mod groq;
pub mod huggingface;
pub mod openai;
pub mod openrouter;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ProviderSettings;

pub use gemini::GeminiProvider;
pub use groq::GroqProvider;
pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;
pub use openrouter::OpenRouterProvider;

/// Fixed bound on every provider call. No retries: a failure surfaces once,
/// to the caller, as the terminal result for that request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Completion budget large enough for a full multi-question analysis.
pub const MAX_COMPLETION_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Unsupported AI provider '{0}'")]
    UnknownProvider(String),

    #[error("{provider} API key not configured")]
    MissingCredential { provider: &'static str },

    #[error("{provider} returned status {status}: {body}")]
    Http {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Request to {provider} failed: {message}")]
    Transport {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub(crate) fn transport(provider: &'static str, err: reqwest::Error) -> Self {
        ProviderError::Transport {
            provider,
            message: err.to_string(),
        }
    }

    pub(crate) fn api(provider: &'static str, message: impl Into<String>) -> Self {
        ProviderError::Api {
            provider,
            message: message.into(),
        }
    }

    pub(crate) fn timeout(provider: &'static str) -> Self {
        ProviderError::Transport {
            provider,
            message: format!("request timed out after {}s", REQUEST_TIMEOUT.as_secs()),
        }
    }
}

/// One vendor integration: a fully assembled prompt in, the raw answer text
/// out, unwrapped from the vendor's response envelope.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn id(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// The seam the orchestrator depends on. Provider selection travels as an
/// explicit per-call argument; nothing here is mutable process state, so
/// concurrent requests with different providers cannot observe each other.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn send(&self, provider_id: &str, prompt: &str) -> Result<String, ProviderError>;
}

pub struct ProviderGateway {
    settings: ProviderSettings,
    http: reqwest::Client,
}

impl ProviderGateway {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionGateway for ProviderGateway {
    async fn send(&self, provider_id: &str, prompt: &str) -> Result<String, ProviderError> {
        let provider: Box<dyn CompletionProvider> = match provider_id.trim().to_lowercase().as_str()
        {
            "openai" => Box::new(OpenAiProvider::from_settings(&self.settings)?),
            "openrouter" => Box::new(OpenRouterProvider::from_settings(
                self.http.clone(),
                &self.settings,
            )?),
            "groq" => Box::new(GroqProvider::from_settings(self.http.clone(), &self.settings)?),
            "huggingface" => Box::new(HuggingFaceProvider::from_settings(
                self.http.clone(),
                &self.settings,
            )?),
            "gemini" => Box::new(GeminiProvider::from_settings(
                self.http.clone(),
                &self.settings,
            )?),
            other => return Err(ProviderError::UnknownProvider(other.to_string())),
        };

        log::info!("Dispatching prompt to {} provider", provider.id());
        provider.complete(prompt).await
    }
}

/// OpenAI-style chat-completion envelope, shared by the vendors that speak
/// that schema (OpenRouter, Groq).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionEnvelope {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessage {
    pub content: Option<String>,
}

impl ChatCompletionEnvelope {
    pub(crate) fn into_text(self, provider: &'static str) -> Result<String, ProviderError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::api(provider, "response contained no message content"))
    }
}

/// Shared status handling for the raw REST adapters: a non-2xx answer
/// becomes an Http error carrying status and body.
pub(crate) async fn expect_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    log::error!("{} API error: {} - {}", provider, status, body);

    Err(ProviderError::Http {
        provider,
        status: status.as_u16(),
        body,
    })
}
