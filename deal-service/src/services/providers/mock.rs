//! Mock provider implementation for testing.

use super::{ChatProvider, ProviderError};
use async_trait::async_trait;

/// Mock chat provider returning a canned reply.
pub struct MockChatProvider {
    enabled: bool,
    reply: String,
}

impl MockChatProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            enabled: true,
            reply: reply.into(),
        }
    }

    /// A provider whose calls always fail, for exercising the error path.
    pub fn failing() -> Self {
        Self {
            enabled: false,
            reply: String::new(),
        }
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::Network(
                "mock provider disabled".to_string(),
            ));
        }

        Ok(self.reply.clone())
    }
}
