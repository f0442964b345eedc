//! OpenAI implementation of [`LlmClient`].

use anyhow::Result;
use async_openai::{
    config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client,
};
use async_trait::async_trait;
use prompt::ChatMessage;
use std::sync::Arc;
use tracing::instrument;

use super::{chat_message_to_openai, LlmClient, LlmConfig};

/// OpenAI-backed LLM client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
        }
    }

    /// Custom base URL for OpenAI-compatible API services.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            model: "gpt-4o-mini".to_string(),
            system_prompt: None,
        }
    }

    /// Builds a client from any [`LlmConfig`]. The configured system prompt
    /// is NOT applied here; callers injecting it through the context
    /// formatter would otherwise send it twice.
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Configured system prompt, prepended to every request when set.
    /// Callers that inject the system message through the context formatter
    /// should leave this unset.
    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages))]
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let mut openai_messages: Vec<async_openai::types::ChatCompletionRequestMessage> =
            Vec::new();
        if let Some(sp) = &self.system_prompt {
            openai_messages.push(
                async_openai::types::ChatCompletionRequestSystemMessageArgs::default()
                    .content(sp.clone())
                    .build()?
                    .into(),
            );
        }
        for msg in &messages {
            openai_messages.push(chat_message_to_openai(msg)?);
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(openai_messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        if let Some(choice) = response.choices.first() {
            Ok(choice.message.content.clone().unwrap_or_default())
        } else {
            anyhow::bail!("No response from OpenAI");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // requires a real API key
    async fn test_chat_completion_live() {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap();
        let client = OpenAILlmClient::new(api_key);
        let reply = client
            .chat_completion(vec![ChatMessage::user("Say hi in one word.")])
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
