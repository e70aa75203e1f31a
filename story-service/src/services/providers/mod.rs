//! Text-generation provider abstraction.
//!
//! A provider turns one (model, prompt) pair into the service's structured
//! message response. The fallback loop in [`crate::services::generation`]
//! decides which errors are worth retrying on the next candidate model.

pub mod anthropic;
pub mod mock;

use crate::services::prompt::StoryPrompt;
use async_trait::async_trait;
use serde::Deserialize;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The requested model does not exist or is not served. Recoverable by
    /// trying the next candidate model.
    #[error("Model '{model}' not available: {detail}")]
    ModelUnavailable { model: String, detail: String },

    /// Every candidate model was tried; carries the last unavailability detail.
    #[error("No compatible model: {0}")]
    NoCompatibleModel(String),

    /// The service answered successfully but produced no usable text.
    #[error("Generation service returned no usable text")]
    EmptyOutput,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => {
                AppError::ConfigError(anyhow::anyhow!("Generation service not configured: {msg}"))
            }
            // The credential only ever travels in a request header, so the
            // propagated detail cannot contain it.
            other => AppError::Upstream(other.to_string()),
        }
    }
}

/// One block of the service's structured output. Only text blocks carry
/// usable story content; everything else is ignored by the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Structured response from the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Trait for text-generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Issue one generation call against the given model.
    async fn generate(
        &self,
        model: &str,
        prompt: &StoryPrompt,
    ) -> Result<MessageResponse, ProviderError>;
}

/// Concatenate the text blocks of a response in order and trim the result.
/// An empty concatenation is a failure, never an empty success.
pub fn extract_text(response: &MessageResponse) -> Result<String, ProviderError> {
    let mut out = String::new();
    for block in &response.content {
        if let ContentBlock::Text { text } = block {
            out.push_str(text);
        }
    }

    let out = out.trim();
    if out.is_empty() {
        Err(ProviderError::EmptyOutput)
    } else {
        Ok(out.to_string())
    }
}
