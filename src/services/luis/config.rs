use std::time::Duration;

use crate::error::{InputError, LuisError, Result};

pub const DEFAULT_ENDPOINT: &str = "https://westus.api.cognitive.microsoft.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_APP_ID: &str = "LUIS_APP_ID";
pub const ENV_APP_KEY: &str = "LUIS_APP_KEY";
pub const ENV_VERBOSE: &str = "LUIS_VERBOSE";
pub const ENV_ENDPOINT: &str = "LUIS_ENDPOINT";

/// Application identity plus request options shared by every call.
#[derive(Clone)]
pub struct ClientConfig {
    pub app_id: String,
    pub app_key: String,
    /// Ask the service for every intent, not just the top one.
    pub verbose: bool,
    pub endpoint: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            verbose: true,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `LUIS_APP_ID`, `LUIS_APP_KEY` and the optional `LUIS_VERBOSE`
    /// and `LUIS_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        let lookup = |name: &str| std::env::var(name).ok();
        Self::from_lookup(lookup)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let app_id = lookup(ENV_APP_ID).ok_or(LuisError::invalid("app id", InputError::Null))?;
        let app_key =
            lookup(ENV_APP_KEY).ok_or(LuisError::invalid("subscription key", InputError::Null))?;

        let mut config = Self::new(app_id, app_key);
        if let Some(raw) = lookup(ENV_VERBOSE) {
            config.verbose = parse_flag(&raw).ok_or_else(|| {
                LuisError::Config(format!("{} must be true or false, got '{}'", ENV_VERBOSE, raw))
            })?;
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = endpoint;
        }

        config.validate()?;
        Ok(config)
    }

    /// App id and key must be non-empty and free of whitespace.
    pub fn validate(&self) -> Result<()> {
        check_token("app id", &self.app_id)?;
        check_token("subscription key", &self.app_key)?;
        if self.endpoint.trim().is_empty() {
            return Err(LuisError::Config("endpoint is empty".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("app_id", &self.app_id)
            .field("verbose", &self.verbose)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn check_token(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(LuisError::invalid(field, InputError::Empty));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(LuisError::invalid(field, InputError::Whitespace));
    }
    Ok(())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
