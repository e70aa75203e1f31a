//! Model-fallback generation.
//!
//! Candidates are tried strictly in order, one call fully awaited before the
//! next. Only "model not found / not served" failures move the loop to the
//! next candidate; every other failure is surfaced immediately.

use crate::services::prompt::StoryPrompt;
use crate::services::providers::{extract_text, ProviderError, TextProvider};

/// Run the prompt through the candidate models until one produces text.
pub async fn generate_with_fallback(
    provider: &dyn TextProvider,
    prompt: &StoryPrompt,
    candidates: &[String],
) -> Result<String, ProviderError> {
    let mut last_detail: Option<String> = None;

    for model in candidates {
        match provider.generate(model, prompt).await {
            Ok(response) => return extract_text(&response),
            Err(ProviderError::ModelUnavailable { model, detail }) => {
                tracing::warn!(model = %model, "Model unavailable, trying next candidate");
                last_detail = Some(detail);
            }
            Err(err) => return Err(err),
        }
    }

    Err(ProviderError::NoCompatibleModel(
        last_detail.unwrap_or_else(|| "no candidate models configured".to_string()),
    ))
}
