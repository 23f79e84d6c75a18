use crate::provider::CompletionProvider;
use crate::{ClientConfig, CompletionRequest, CompletionResponse, Error};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, error, info};

/// Client for a single Azure OpenAI chat-completions deployment.
///
/// Each call issues exactly one POST and returns the text of the first
/// choice. Failures are logged and returned to the caller; nothing is retried.
/// Dropping the future returned by [`PromptClient::complete`] aborts the
/// in-flight request.
pub struct PromptClient {
    client: Client,
    config: ClientConfig,
}

impl PromptClient {
    /// Create a client for the given deployment.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        config.validate()?;
        let client = Client::builder().build()?;

        Ok(Self { client, config })
    }

    /// Create a client from `AZURE_OPENAI_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Use a custom reqwest client (proxy settings, TLS roots, connection pool).
    /// The configured timeout is still applied per request.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `prompt` as a single user message and return the generated text.
    pub async fn complete(&self, prompt: &str) -> Result<String, Error> {
        let request = CompletionRequest::user(prompt, self.config.max_tokens);
        self.send(&request).await
    }

    /// Like [`PromptClient::complete`], with a system instruction ahead of the prompt.
    pub async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String, Error> {
        let request = CompletionRequest::with_system(system, prompt, self.config.max_tokens);
        self.send(&request).await
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String, Error> {
        info!(
            deployment = %self.config.deployment,
            messages = request.messages.len(),
            prompt_len = request.prompt_len(),
            max_tokens = request.max_tokens,
            "sending completion request"
        );

        let mut builder = self
            .client
            .post(self.config.completions_url()?)
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request);

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, timeout = e.is_timeout(), "completion request failed");
            Error::Network(e)
        })?;

        let status = response.status();
        info!(status = status.as_u16(), "received completion response");

        let body = response.text().await.map_err(|e| {
            error!(error = %e, status = status.as_u16(), "failed to read response body");
            Error::Network(e)
        })?;

        if !status.is_success() {
            error!(status = status.as_u16(), body = %body, "completion request rejected");
            return Err(Error::request_failed(status.as_u16(), body));
        }

        let parsed = CompletionResponse::parse(&body).map_err(|e| {
            error!(error = %e, "could not decode completion response");
            e
        })?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                finish_reason = parsed.finish_reason().unwrap_or("unknown"),
                "completion usage"
            );
        }

        parsed.into_text().map_err(|e| {
            error!(error = %e, "completion response had no usable text");
            e
        })
    }
}

#[async_trait::async_trait]
impl CompletionProvider for PromptClient {
    async fn complete(&self, prompt: &str) -> Result<String, Error> {
        PromptClient::complete(self, prompt).await
    }
}
