use std::fmt;
use std::time::Duration;

use crate::error::ConfigurationError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "OPENAI_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Credential for the completion service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigurationError::MissingCredential {
                var: API_KEY_VAR.to_string(),
            });
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Settings for the completion client, read once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    /// API key (from OPENAI_API_KEY env var)
    pub api_key: ApiKey,
    /// Base URL of an OpenAI-compatible API, without trailing slash
    pub base_url: String,
    /// Model name (e.g., "gpt-3.5-turbo")
    pub model: String,
    /// Sampling temperature (0-2)
    pub temperature: f64,
    /// Maximum tokens per completion; provider default when unset
    pub max_tokens: Option<u32>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Settings {
    /// Create settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .ok_or_else(|| ConfigurationError::MissingCredential {
                var: API_KEY_VAR.to_string(),
            })
            .and_then(ApiKey::new)?;

        let mut settings = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            settings = settings.with_base_url(base_url);
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.trim().is_empty()) {
            settings.model = model;
        }
        Ok(settings)
    }

    /// Create with default model and endpoint
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Result<Self, ConfigurationError> {
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigurationError::InvalidSetting {
                name: "temperature",
                reason: format!("{} is outside 0.0..=2.0", temperature),
            });
        }
        self.temperature = temperature;
        Ok(self)
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Result<Self, ConfigurationError> {
        if max_tokens == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "max_tokens",
                reason: "must be at least 1".to_string(),
            });
        }
        self.max_tokens = Some(max_tokens);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigurationError> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidSetting {
                name: "timeout",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Command-line values layered over the environment
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
}

impl SettingsOverrides {
    /// Apply every value that is set, validating numeric ones
    pub fn apply(&self, mut settings: Settings) -> Result<Settings, ConfigurationError> {
        if let Some(base_url) = &self.base_url {
            settings = settings.with_base_url(base_url.as_str());
        }
        if let Some(model) = &self.model {
            settings = settings.with_model(model.as_str());
        }
        if let Some(temperature) = self.temperature {
            settings = settings.with_temperature(temperature)?;
        }
        if let Some(max_tokens) = self.max_tokens {
            settings = settings.with_max_tokens(max_tokens)?;
        }
        if let Some(timeout) = self.timeout {
            settings = settings.with_timeout(timeout)?;
        }
        Ok(settings)
    }
}
