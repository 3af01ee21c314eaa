//! Perplexity provider implementation.
//!
//! Speaks the OpenAI-compatible chat-completion wire format against the
//! Perplexity API. Non-streaming only.

use super::{ChatProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Perplexity provider configuration.
#[derive(Clone)]
pub struct PerplexityConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub model: String,
}

pub struct PerplexityProvider {
    config: PerplexityConfig,
    client: Client,
}

impl PerplexityProvider {
    pub fn new(config: PerplexityConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatProvider for PerplexityProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        let request = build_request(&self.config.model, system_prompt, user_prompt);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = user_prompt.len(),
            "Sending request to Perplexity API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let api_response: ChatCompletionResponse = response.json().await.map_err(|e| {
            ProviderError::Api {
                status: 200,
                message: format!("Failed to parse response: {}", e),
            }
        })?;

        if let Some(usage) = &api_response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens.unwrap_or(0),
                completion_tokens = usage.completion_tokens.unwrap_or(0),
                "Perplexity completion finished"
            );
        }

        extract_content(api_response)
    }
}

/// Build the wire request for one system+user round.
fn build_request(model: &str, system_prompt: &str, user_prompt: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: system_prompt.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user_prompt.to_string(),
            },
        ],
    }
}

fn extract_content(response: ChatCompletionResponse) -> Result<String, ProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(ProviderError::EmptyResponse)
}

// ============================================================================
// Perplexity API Request/Response Types (OpenAI-compatible)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize, Default)]
struct Usage {
    prompt_tokens: Option<i64>,
    completion_tokens: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_system_and_user_roles() {
        let request = build_request("sonar-pro", "you hunt deals", "find me earbuds");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "sonar-pro");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "you hunt deals");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "find me earbuds");
    }

    #[test]
    fn first_choice_content_is_extracted() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r###"{
                "choices": [{"message": {"role": "assistant", "content": "## Deal one"}}],
                "usage": {"prompt_tokens": 120, "completion_tokens": 340}
            }"###,
        )
        .unwrap();

        assert_eq!(extract_content(response).unwrap(), "## Deal one");
    }

    #[test]
    fn missing_choices_is_an_empty_response() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_content(response),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let provider = PerplexityProvider::new(PerplexityConfig {
            api_key: Secret::new("pplx-test".to_string()),
            base_url: "https://api.perplexity.ai/".to_string(),
            model: "sonar-pro".to_string(),
        });

        assert_eq!(
            provider.completions_url(),
            "https://api.perplexity.ai/chat/completions"
        );
    }
}
