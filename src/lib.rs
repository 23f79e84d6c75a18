//! A minimal async client for Azure OpenAI chat-completion deployments.
//!
//! One call sends one prompt and returns the text of the first choice. Endpoint,
//! key and deployment are supplied through [`ClientConfig`], either directly or
//! from `AZURE_OPENAI_*` environment variables.

pub mod error;
pub mod types;
pub mod provider;
pub mod providers;
pub mod response;

// Re-export core types for easy usage
pub use error::Error;
pub use types::*;
pub use provider::CompletionProvider;
pub use providers::*;
pub use response::*;
