//! Translation provider trait and types.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::AcceptedTranslation;

/// Which configured model a generation request should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSelector {
    /// The provider's main model.
    #[default]
    Primary,
    /// The provider's secondary model (larger context or different limits).
    Fallback,
}

impl std::str::FromStr for ModelSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "main" => Ok(ModelSelector::Primary),
            "fallback" | "secondary" => Ok(ModelSelector::Fallback),
            _ => Err(format!("Unknown model: {}. Use: primary or fallback.", s)),
        }
    }
}

impl std::fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelSelector::Primary => write!(f, "primary"),
            ModelSelector::Fallback => write!(f, "fallback"),
        }
    }
}

/// Everything a provider needs to produce candidates for one sentence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The sentence to translate.
    pub source: String,

    /// Previously accepted pairs used as few-shot examples.
    #[serde(default)]
    pub examples: Vec<AcceptedTranslation>,

    /// Translations the reviewer accepted earlier in this sitting.
    #[serde(default)]
    pub prior_translations: Vec<String>,

    /// Model to use.
    #[serde(default)]
    pub model: ModelSelector,

    /// Free-text instructions from the prompt editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl GenerationRequest {
    /// Create a request for `source` with no context.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Add few-shot examples.
    pub fn with_examples(mut self, examples: Vec<AcceptedTranslation>) -> Self {
        self.examples = examples;
        self
    }

    /// Add earlier accepted translations.
    pub fn with_prior_translations(mut self, prior: Vec<String>) -> Self {
        self.prior_translations = prior;
        self
    }

    /// Select the model.
    pub fn with_model(mut self, model: ModelSelector) -> Self {
        self.model = model;
        self
    }

    /// Add instructions. Blank instructions are ignored.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        let instructions = instructions.into();
        self.instructions = if instructions.trim().is_empty() {
            None
        } else {
            Some(instructions)
        };
        self
    }
}

/// Configuration for translation providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model used for `ModelSelector::Primary`.
    pub primary_model: String,

    /// Model used for `ModelSelector::Fallback`.
    pub fallback_model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,

    /// Number of candidates each request must return.
    pub candidate_count: usize,

    /// Language to translate into.
    pub target_language: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            primary_model: "gemini-2.5-flash".to_string(),
            fallback_model: "gemini-2.0-flash-001".to_string(),
            max_tokens: 1024,
            temperature: 0.7,
            candidate_count: 4,
            target_language: "Portuguese".to_string(),
        }
    }
}

impl LlmConfig {
    /// Model name for a selector.
    pub fn model_for(&self, selector: ModelSelector) -> &str {
        match selector {
            ModelSelector::Primary => &self.primary_model,
            ModelSelector::Fallback => &self.fallback_model,
        }
    }
}

/// Trait for candidate translation providers.
///
/// Implementations must be thread-safe (Send + Sync) so the review server
/// can share one provider across requests.
pub trait TranslationProvider: Send + Sync {
    /// Generate exactly `config().candidate_count` candidate translations.
    ///
    /// Fails with `RenditionError::Generation` when the provider cannot be
    /// reached, rejects the request, or returns output in the wrong shape.
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_selector_parsing() {
        assert_eq!("primary".parse::<ModelSelector>(), Ok(ModelSelector::Primary));
        assert_eq!("Fallback".parse::<ModelSelector>(), Ok(ModelSelector::Fallback));
        assert!("gpt".parse::<ModelSelector>().is_err());
    }

    #[test]
    fn test_model_for() {
        let config = LlmConfig::default();
        assert_eq!(config.model_for(ModelSelector::Primary), "gemini-2.5-flash");
        assert_eq!(config.model_for(ModelSelector::Fallback), "gemini-2.0-flash-001");
    }

    #[test]
    fn test_blank_instructions_ignored() {
        let request = GenerationRequest::new("Hi").with_instructions("   ");
        assert!(request.instructions.is_none());

        let request = GenerationRequest::new("Hi").with_instructions("Be formal");
        assert_eq!(request.instructions.as_deref(), Some("Be formal"));
    }
}
