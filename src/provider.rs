use crate::Error;

/// A backend that turns a prompt into generated text.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync + 'static {
    /// Send `prompt` as a single user message and return the first choice's text.
    async fn complete(&self, prompt: &str) -> Result<String, Error>;
}
