//! Mock provider implementation for testing.

use super::{ContentBlock, MessageResponse, ProviderError, TextProvider};
use crate::services::prompt::StoryPrompt;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted outcome for one candidate model.
pub enum MockBehavior {
    /// Succeed with these content blocks.
    Reply(Vec<ContentBlock>),
    /// Fail as "model not found / not served" with this detail.
    ModelUnavailable(String),
    /// Fail hard (non-recoverable upstream error) with this detail.
    Fail(String),
}

/// Mock text provider with per-model scripted behaviors.
///
/// Unscripted models fall back to the default reply if one is set, and
/// otherwise fail hard — a test that reaches an unexpected model aborts the
/// fallback loop instead of silently passing.
pub struct MockTextProvider {
    default_reply: Option<String>,
    behaviors: HashMap<String, MockBehavior>,
    calls: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self {
            default_reply: None,
            behaviors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider that answers every model with the given text.
    pub fn replying(text: impl Into<String>) -> Self {
        let mut provider = Self::new();
        provider.default_reply = Some(text.into());
        provider
    }

    pub fn with_behavior(mut self, model: &str, behavior: MockBehavior) -> Self {
        self.behaviors.insert(model.to_string(), behavior);
        self
    }

    /// Models attempted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        model: &str,
        _prompt: &StoryPrompt,
    ) -> Result<MessageResponse, ProviderError> {
        self.calls.lock().unwrap().push(model.to_string());

        if let Some(behavior) = self.behaviors.get(model) {
            return match behavior {
                MockBehavior::Reply(blocks) => Ok(MessageResponse {
                    content: blocks.clone(),
                }),
                MockBehavior::ModelUnavailable(detail) => Err(ProviderError::ModelUnavailable {
                    model: model.to_string(),
                    detail: detail.clone(),
                }),
                MockBehavior::Fail(detail) => Err(ProviderError::ApiError(detail.clone())),
            };
        }

        match &self.default_reply {
            Some(text) => Ok(MessageResponse {
                content: vec![ContentBlock::Text { text: text.clone() }],
            }),
            None => Err(ProviderError::ApiError(format!(
                "mock: no behavior scripted for model '{}'",
                model
            ))),
        }
    }
}
