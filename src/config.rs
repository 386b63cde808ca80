use std::env;
use secrecy::SecretString;

/// Per-vendor model ids and credentials. A missing key is surfaced as a
/// MissingCredential when that provider is actually selected, never at
/// startup.
#[derive(Clone, Debug)]
pub struct ProviderSettings {
    pub openai_api_key: Option<SecretString>,
    pub openai_model: String,
    pub openrouter_api_key: Option<SecretString>,
    pub openrouter_model: String,
    pub openrouter_site_url: String,
    pub openrouter_site_name: String,
    pub groq_api_key: Option<SecretString>,
    pub groq_model: String,
    pub huggingface_api_key: Option<SecretString>,
    pub huggingface_model: String,
    pub gemini_api_key: Option<SecretString>,
    pub gemini_model: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub users_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub default_provider: String,
    pub providers: ProviderSettings,
}

fn secret_var(key: &str) -> Option<SecretString> {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "question_difficulty_app".to_string()),
            users_collection: env::var("USERS_COLLECTION").unwrap_or_else(|_| "users".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            default_provider: env::var("AI_SERVICE").unwrap_or_else(|_| "gemini".to_string()),
            providers: ProviderSettings {
                openai_api_key: secret_var("OPENAI_API_KEY"),
                openai_model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
                openrouter_api_key: secret_var("OPENROUTER_API_KEY"),
                openrouter_model: env::var("OPENROUTER_MODEL")
                    .unwrap_or_else(|_| "anthropic/claude-3.5-sonnet".to_string()),
                openrouter_site_url: env::var("OPENROUTER_SITE_URL")
                    .unwrap_or_else(|_| "https://examsight.app".to_string()),
                openrouter_site_name: env::var("OPENROUTER_SITE_NAME")
                    .unwrap_or_else(|_| "ExamSight Question Analyzer".to_string()),
                groq_api_key: secret_var("GROQ_API_KEY"),
                groq_model: env::var("GROQ_MODEL")
                    .unwrap_or_else(|_| "llama3-8b-8192".to_string()),
                huggingface_api_key: secret_var("HUGGINGFACE_API_KEY"),
                huggingface_model: env::var("HUGGINGFACE_MODEL")
                    .unwrap_or_else(|_| "meta-llama/Llama-2-7b-chat-hf".to_string()),
                gemini_api_key: secret_var("GEMINI_API_KEY"),
                gemini_model: env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            },
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "examsight-test".to_string(),
            users_collection: "users".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            default_provider: "gemini".to_string(),
            providers: ProviderSettings::test_settings(),
        }
    }
}

#[cfg(test)]
impl ProviderSettings {
    pub fn test_settings() -> Self {
        Self {
            openai_api_key: Some(SecretString::from("test-openai-key".to_string())),
            openai_model: "gpt-3.5-turbo".to_string(),
            openrouter_api_key: Some(SecretString::from("test-openrouter-key".to_string())),
            openrouter_model: "anthropic/claude-3.5-sonnet".to_string(),
            openrouter_site_url: "https://examsight.app".to_string(),
            openrouter_site_name: "ExamSight Question Analyzer".to_string(),
            groq_api_key: Some(SecretString::from("test-groq-key".to_string())),
            groq_model: "llama3-8b-8192".to_string(),
            huggingface_api_key: None,
            huggingface_model: "meta-llama/Llama-2-7b-chat-hf".to_string(),
            gemini_api_key: Some(SecretString::from("test-gemini-key".to_string())),
            gemini_model: "gemini-2.5-flash".to_string(),
        }
    }

    /// Settings with every credential absent, for MissingCredential paths.
    pub fn without_credentials() -> Self {
        Self {
            openai_api_key: None,
            openrouter_api_key: None,
            groq_api_key: None,
            huggingface_api_key: None,
            gemini_api_key: None,
            ..Self::test_settings()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert_eq!(config.users_collection, "users");
        assert!(!config.default_provider.is_empty());
        assert!(!config.providers.gemini_model.is_empty());
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "examsight-test");
        assert_eq!(config.default_provider, "gemini");
    }

    #[test]
    fn test_settings_without_credentials() {
        let settings = ProviderSettings::without_credentials();
        assert!(settings.openai_api_key.is_none());
        assert!(settings.gemini_api_key.is_none());
        assert_eq!(settings.groq_model, "llama3-8b-8192");
    }
}
