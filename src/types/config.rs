use crate::Error;
use reqwest::Url;
use std::env;
use std::fmt;
use std::time::Duration;

/// API version sent when none is configured.
pub const DEFAULT_API_VERSION: &str = "2025-01-01-preview";

/// Deployment used by `from_env` when `AZURE_OPENAI_MODEL_DEPLOYMENT_NAME` is unset.
pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o";

/// Output token cap sent with every request unless overridden.
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
const ENV_DEPLOYMENT: &str = "AZURE_OPENAI_MODEL_DEPLOYMENT_NAME";
const ENV_API_VERSION: &str = "AZURE_OPENAI_API_VERSION";
const ENV_MAX_TOKENS: &str = "AZURE_OPENAI_MAX_TOKENS";
const ENV_TIMEOUT_SECS: &str = "AZURE_OPENAI_TIMEOUT_SECS";

/// Connection settings for a single Azure OpenAI deployment.
#[derive(Clone)]
pub struct ClientConfig {
    /// Resource base URL, e.g. `https://my-resource.openai.azure.com`.
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub max_tokens: u32,
    /// Per-request deadline. `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration with the default API version, token cap and timeout.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            deployment: deployment.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Create configuration from `AZURE_OPENAI_*` environment variables.
    ///
    /// `AZURE_OPENAI_ENDPOINT` and `AZURE_OPENAI_API_KEY` are required. The
    /// deployment, API version, token cap and timeout fall back to defaults.
    /// A timeout of `0` seconds disables the deadline.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::config(format!("{name} environment variable is required")))
        };

        let endpoint = required(ENV_ENDPOINT)?;
        let api_key = required(ENV_API_KEY)?;
        let deployment = lookup(ENV_DEPLOYMENT).unwrap_or_else(|| DEFAULT_DEPLOYMENT.to_string());

        let mut config = Self::new(endpoint, api_key, deployment);

        if let Some(api_version) = lookup(ENV_API_VERSION) {
            config.api_version = api_version;
        }

        if let Some(raw) = lookup(ENV_MAX_TOKENS) {
            config.max_tokens = raw.trim().parse().map_err(|_| {
                Error::config(format!("{ENV_MAX_TOKENS} must be a positive integer, got '{raw}'"))
            })?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that every field needed to address the deployment is present.
    pub fn validate(&self) -> Result<(), Error> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::config("endpoint must not be empty"));
        }
        let endpoint = Url::parse(self.endpoint.trim())
            .map_err(|e| Error::config(format!("endpoint '{}' is not a valid URL: {e}", self.endpoint)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "endpoint must use http or https, got '{}'",
                endpoint.scheme()
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(Error::config("API key must not be empty"));
        }
        if self.deployment.trim().is_empty() {
            return Err(Error::config("deployment name must not be empty"));
        }
        // Deployment names become a single path segment.
        let valid_name = self
            .deployment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid_name || self.deployment == "." || self.deployment == ".." {
            return Err(Error::config(format!(
                "deployment name '{}' may only contain letters, digits, '-', '_' and '.'",
                self.deployment
            )));
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::config("API version must not be empty"));
        }
        if self.max_tokens == 0 {
            return Err(Error::config("max_tokens must be greater than zero"));
        }
        Ok(())
    }

    /// Chat-completions URL for the configured deployment, without the
    /// `api-version` query parameter.
    pub fn completions_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(self.endpoint.trim())
            .map_err(|e| Error::config(format!("endpoint '{}' is not a valid URL: {e}", self.endpoint)))?;
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("endpoint '{}' cannot carry a path", self.endpoint)))?
            .pop_if_empty()
            .extend(["openai", "deployments", self.deployment.as_str(), "chat", "completions"]);
        Ok(url)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}
