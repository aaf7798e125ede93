//! Gateway configuration read once at startup.
//!
//! ```rust
//! use parley::GatewayConfig;
//!
//! let config = GatewayConfig::from_lookup(|key| match key {
//!     "OPENROUTER_API_KEY" => Some("sk-or-v1-example".to_string()),
//!     "OPENROUTER_AVAILABLE_MODELS" => Some("m1, m2".to_string()),
//!     "OPENROUTER_DEFAULT_MODEL" => Some("m1".to_string()),
//!     _ => None,
//! })
//! .expect("config should parse");
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.allowed_models, vec!["m1", "m2"]);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use pprovider::{ModelRegistry, ProviderId, RetryPolicy, SecretString};

pub const ENV_PROVIDER: &str = "PARLEY_PROVIDER";
pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_DEFAULT_MODEL: &str = "OPENROUTER_DEFAULT_MODEL";
pub const ENV_AVAILABLE_MODELS: &str = "OPENROUTER_AVAILABLE_MODELS";
pub const ENV_TIMEOUT_SECONDS: &str = "OPENROUTER_TIMEOUT_SECONDS";
pub const ENV_MAX_RETRIES: &str = "OPENROUTER_MAX_RETRIES";
pub const ENV_BASE_DELAY_MS: &str = "OPENROUTER_BASE_DELAY_MS";
pub const ENV_TOTAL_TIMEOUT_SECONDS: &str = "OPENROUTER_TOTAL_TIMEOUT_SECONDS";
pub const ENV_APP_NAME: &str = "OPENROUTER_APP_NAME";
pub const ENV_REFERER: &str = "OPENROUTER_REFERER";
pub const ENV_DEBUG: &str = "OPENROUTER_DEBUG";

/// Value shipped in sample configuration files; never a real key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_OPENROUTER_API_KEY";

pub const DEFAULT_MODEL: &str = "qwen/qwen3-coder:free";
pub const DEFAULT_APP_NAME: &str = "Parley";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    MissingApiKey,
    PlaceholderApiKey,
    EmptyModelList,
    DefaultModelNotAllowed {
        model: String,
    },
    ZeroAttempts,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value '{value}' for {key}: {reason}")
            }
            Self::MissingApiKey => write!(f, "{ENV_API_KEY} is not set"),
            Self::PlaceholderApiKey => {
                write!(f, "{ENV_API_KEY} still holds the placeholder value")
            }
            Self::EmptyModelList => write!(f, "{ENV_AVAILABLE_MODELS} must list at least one model"),
            Self::DefaultModelNotAllowed { model } => write!(
                f,
                "default model '{model}' is not in {ENV_AVAILABLE_MODELS}"
            ),
            Self::ZeroAttempts => write!(f, "{ENV_MAX_RETRIES} must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

/// Immutable gateway settings. Built once, then handed to the runtime builder.
#[derive(Clone)]
pub struct GatewayConfig {
    pub provider: ProviderId,
    api_key: Option<SecretString>,
    pub base_url: String,
    pub default_model: String,
    pub allowed_models: Vec<String>,
    pub request_timeout: Duration,
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub total_timeout: Option<Duration>,
    pub app_name: String,
    /// Site URL sent as `HTTP-Referer`; omitted when unset.
    pub referer: Option<String>,
    pub debug_enabled: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: ProviderId::OpenRouter,
            api_key: None,
            base_url: ProviderId::OpenRouter.default_base_url().to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            allowed_models: vec![DEFAULT_MODEL.to_string()],
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            total_timeout: None,
            app_name: DEFAULT_APP_NAME.to_string(),
            referer: None,
            debug_enabled: false,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for absent or
    /// blank keys. Parse failures name the offending key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = read(ENV_PROVIDER) {
            config.provider = ProviderId::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                key: ENV_PROVIDER,
                value: value.clone(),
                reason: "expected 'openrouter' or 'openai'".to_string(),
            })?;
            config.base_url = config.provider.default_base_url().to_string();
        }

        if let Some(value) = read(ENV_API_KEY) {
            config.api_key = SecretString::api_key(value).ok();
        }

        if let Some(value) = read(ENV_BASE_URL) {
            config.base_url = value;
        }

        if let Some(value) = read(ENV_DEFAULT_MODEL) {
            config.default_model = value;
        }

        if let Some(value) = read(ENV_AVAILABLE_MODELS) {
            config.allowed_models = split_models(&value);
        }

        if let Some(value) = read(ENV_TIMEOUT_SECONDS) {
            config.request_timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECONDS, &value)?);
        }

        if let Some(value) = read(ENV_MAX_RETRIES) {
            config.max_attempts = parse_number(ENV_MAX_RETRIES, &value)?;
        }

        if let Some(value) = read(ENV_BASE_DELAY_MS) {
            config.base_delay = Duration::from_millis(parse_number(ENV_BASE_DELAY_MS, &value)?);
        }

        if let Some(value) = read(ENV_TOTAL_TIMEOUT_SECONDS) {
            let seconds: u64 = parse_number(ENV_TOTAL_TIMEOUT_SECONDS, &value)?;
            config.total_timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
        }

        if let Some(value) = read(ENV_APP_NAME) {
            config.app_name = value;
        }

        if let Some(value) = read(ENV_REFERER) {
            config.referer = Some(value);
        }

        if let Some(value) = read(ENV_DEBUG) {
            config.debug_enabled = parse_bool(ENV_DEBUG, &value)?;
        }

        Ok(config)
    }

    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = provider;
        self
    }

    /// Blank keys clear the configured key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::api_key(api_key).ok();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_allowed_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_total_timeout(mut self, total_timeout: Duration) -> Self {
        self.total_timeout = Some(total_timeout);
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_debug(mut self, debug_enabled: bool) -> Self {
        self.debug_enabled = debug_enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .api_key
            .as_ref()
            .is_some_and(|key| key.expose() == PLACEHOLDER_API_KEY)
        {
            return Err(ConfigError::PlaceholderApiKey);
        }

        if self.allowed_models.iter().all(|model| model.trim().is_empty()) {
            return Err(ConfigError::EmptyModelList);
        }

        if !self.allowed_models.contains(&self.default_model) {
            return Err(ConfigError::DefaultModelNotAllowed {
                model: self.default_model.clone(),
            });
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        Ok(())
    }

    pub fn is_api_key_configured(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| key.expose() != PLACEHOLDER_API_KEY)
    }

    /// The configured key, unless it is missing or still the placeholder.
    pub fn api_key(&self) -> Result<&SecretString, ConfigError> {
        match &self.api_key {
            None => Err(ConfigError::MissingApiKey),
            Some(key) if key.expose() == PLACEHOLDER_API_KEY => Err(ConfigError::PlaceholderApiKey),
            Some(key) => Ok(key),
        }
    }

    pub fn registry(&self) -> ModelRegistry {
        ModelRegistry::new(self.default_model.clone(), self.allowed_models.iter().cloned())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.base_delay)
    }

    /// One-line, secret-free description suitable for a startup log line.
    pub fn summary(&self) -> String {
        let total_timeout = match self.total_timeout {
            Some(limit) => format!("{}s", limit.as_secs()),
            None => "none".to_string(),
        };

        format!(
            "provider={} base_url={} default_model={} models={} timeout={}s total_timeout={} max_attempts={} base_delay={}ms debug={} app_name={} api_key_configured={}",
            self.provider,
            self.base_url,
            self.default_model,
            self.allowed_models.len(),
            self.request_timeout.as_secs(),
            total_timeout,
            self.max_attempts,
            self.base_delay.as_millis(),
            self.debug_enabled,
            self.app_name,
            self.is_api_key_configured()
        )
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("allowed_models", &self.allowed_models)
            .field("request_timeout", &self.request_timeout)
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("total_timeout", &self.total_timeout)
            .field("app_name", &self.app_name)
            .field("referer", &self.referer)
            .field("debug_enabled", &self.debug_enabled)
            .finish()
    }
}

fn split_models(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|model| !model.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: Display,
{
    value.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
