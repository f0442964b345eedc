//! Handler configuration: strategy switch, context budget, prompts, costs.

use std::env;

/// Configuration shared by the chat and image handlers.
#[derive(Debug, Clone)]
pub struct ChatHandlerConfig {
    /// Selects the relevance-ranked strategy instead of the plain recency
    /// window when assembling context.
    pub use_relevant_context: bool,
    /// Word budget per assembled context window.
    pub max_context_words: usize,
    /// System prompt injected by the context formatter for chat requests.
    pub system_prompt: Option<String>,
    /// System prompt for image requests; falls back to `system_prompt`
    /// when unset.
    pub image_system_prompt: Option<String>,
    /// Credits charged per successful chat completion.
    pub chat_cost: i64,
    /// Credits charged per successful image generation or edit.
    pub image_cost: i64,
}

impl Default for ChatHandlerConfig {
    fn default() -> Self {
        Self {
            use_relevant_context: true,
            max_context_words: 1000,
            system_prompt: None,
            image_system_prompt: None,
            chat_cost: 1,
            image_cost: 4,
        }
    }
}

impl ChatHandlerConfig {
    /// System prompt effective for image requests.
    pub fn image_prompt(&self) -> Option<&str> {
        self.image_system_prompt
            .as_deref()
            .or(self.system_prompt.as_deref())
    }

    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            use_relevant_context: env::var("USE_RELEVANT_CONTEXT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.use_relevant_context),
            max_context_words: env::var("MAX_CONTEXT_WORDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_context_words),
            system_prompt: env::var("SYSTEM_PROMPT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            image_system_prompt: env::var("IMAGE_SYSTEM_PROMPT")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            chat_cost: env::var("CHAT_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chat_cost),
            image_cost: env::var("IMAGE_COST")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.image_cost),
        }
    }
}
