//! Anthropic Messages API provider.

use super::{MessageResponse, ProviderError, TextProvider};
use crate::services::prompt::StoryPrompt;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// Anthropic API base URL.
const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";

/// Messages API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Fixed maximum output size for one story.
const MAX_OUTPUT_TOKENS: u32 = 700;

/// Anthropic text provider.
pub struct AnthropicTextProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl AnthropicTextProvider {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            base_url: ANTHROPIC_API_BASE.to_string(),
            client,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl TextProvider for AnthropicTextProvider {
    async fn generate(
        &self,
        model: &str,
        prompt: &StoryPrompt,
    ) -> Result<MessageResponse, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ProviderError::NotConfigured("ANTHROPIC_API_KEY is not set".to_string())
            })?;

        let request = MessagesRequest {
            model,
            max_tokens: MAX_OUTPUT_TOKENS,
            system: &prompt.system,
            messages: [ApiMessage {
                role: "user",
                content: &prompt.user,
            }],
        };

        tracing::debug!(
            model = %model,
            prompt_len = prompt.user.len(),
            "Sending request to Anthropic API"
        );

        // The credential travels in a header, never in the URL, so error
        // details built from status and body cannot leak it.
        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = format!("Anthropic API error {}: {}", status, error_text);

            if is_model_not_found(status.as_u16(), &error_text) {
                return Err(ProviderError::ModelUnavailable {
                    model: model.to_string(),
                    detail,
                });
            }
            return Err(ProviderError::ApiError(detail));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))
    }
}

/// Best-effort classification of "this model does not exist / is not served".
/// Kept in sync with the Messages API error shape: a 404 status, or an error
/// body that mentions both a not-found condition and a model.
fn is_model_not_found(status: u16, body: &str) -> bool {
    status == 404 || (body.contains("not_found") && body.contains("model"))
}

// ============================================================================
// Messages API request types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ApiMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}
