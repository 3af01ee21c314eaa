//! Chat-completion provider abstractions and implementations.
//!
//! The service talks to exactly one provider per process, but the trait
//! keeps the outbound call swappable (Perplexity in production, a mock in
//! tests).

pub mod mock;
pub mod perplexity;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response from provider")]
    EmptyResponse,
}

/// One non-streaming chat-completion round: a system and a user message in,
/// the assistant's text out.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError>;
}
