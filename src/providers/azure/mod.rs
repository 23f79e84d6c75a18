pub mod client;

pub use client::PromptClient;
