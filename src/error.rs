use thiserror::Error;

/// Errors that can occur when requesting a completion.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: DNS, connect, timeout or a truncated body.
    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn request_failed(status: u16, body: impl Into<String>) -> Self {
        Error::RequestFailed {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedResponse(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Whether this is a network failure caused by the request deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Network(e) if e.is_timeout())
    }
}
