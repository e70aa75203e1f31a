use serde::Deserialize;
use service_core::config as core_config;
use service_core::config::optional_env;
use service_core::error::AppError;

/// First built-in fallback model, used after any configured override.
pub const DEFAULT_TEXT_MODEL: &str = "claude-sonnet-4-6";

/// Second built-in fallback model.
pub const FALLBACK_TEXT_MODEL: &str = "claude-haiku-4-5";

#[derive(Debug, Clone, Deserialize)]
pub struct StoryConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub anthropic: AnthropicConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    /// API credential for the text-generation service. Optional at startup:
    /// requests fail with a configuration error until it is set.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Preferred model identifier, tried before the built-in fallbacks.
    pub preferred_model: Option<String>,
}

impl StoryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(StoryConfig {
            common,
            anthropic: AnthropicConfig {
                api_key: optional_env("ANTHROPIC_API_KEY"),
            },
            models: ModelConfig {
                preferred_model: optional_env("STORY_MODEL"),
            },
        })
    }

    /// Ordered candidate model list: the configured override (if any), then
    /// the two built-in fallbacks. Duplicates are not removed.
    pub fn candidate_models(&self) -> Vec<String> {
        let mut models = Vec::with_capacity(3);
        if let Some(preferred) = &self.models.preferred_model {
            models.push(preferred.clone());
        }
        models.push(DEFAULT_TEXT_MODEL.to_string());
        models.push(FALLBACK_TEXT_MODEL.to_string());
        models
    }
}
