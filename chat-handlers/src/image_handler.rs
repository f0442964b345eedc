//! Image generation and edit flows: narrative context, provider call,
//! asset upload, persistence, billing.

use std::sync::Arc;

use asset_store::AssetStore;
use chat_context::{format_as_narrative, ContextAssembler};
use credit_ledger::CreditLedger;
use image_generation_client::ImageGenerator;
use message_store::MessageStore;
use pixchat_core::{ChatRole, ChatTurn, HandlerError, PixchatError};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::config::ChatHandlerConfig;

/// Result of a successful image generation or edit.
#[derive(Debug, Clone)]
pub struct GeneratedImageReply {
    /// Public URL of the stored image.
    pub url: String,
    /// Prompt the image was generated from.
    pub prompt: String,
}

/// Handles image generation and edit requests end to end.
///
/// **External interactions:**
/// - **MessageStore** (via `store`): read prior turns for context, write the
///   user request and the assistant image turn.
/// - **CreditLedger** (via `ledger`): balance check, debit on success.
/// - **ImageGenerator** (via `images`): DALL-E style generation/edit.
/// - **AssetStore** (via `assets`): upload of the produced bytes, keyed by
///   session so deletion can remove a whole conversation's images.
pub struct ImageHandler {
    images: Arc<dyn ImageGenerator>,
    store: Arc<dyn MessageStore>,
    ledger: Arc<dyn CreditLedger>,
    assets: Arc<dyn AssetStore>,
    assembler: ContextAssembler,
    config: ChatHandlerConfig,
}

impl ImageHandler {
    /// Constructs an `ImageHandler`. Stores dependencies only; no I/O.
    pub fn new(
        images: Arc<dyn ImageGenerator>,
        store: Arc<dyn MessageStore>,
        ledger: Arc<dyn CreditLedger>,
        assets: Arc<dyn AssetStore>,
        config: ChatHandlerConfig,
    ) -> Self {
        let assembler = ContextAssembler::new(store.clone());
        Self {
            images,
            store,
            ledger,
            assets,
            assembler,
            config,
        }
    }

    async fn check_balance(&self, user_id: &str) -> Result<(), PixchatError> {
        let available = self
            .ledger
            .balance(user_id)
            .await
            .map_err(|e| PixchatError::Database(e.to_string()))?;
        if available < self.config.image_cost {
            return Err(HandlerError::InsufficientCredits {
                needed: self.config.image_cost,
                available,
            }
            .into());
        }
        Ok(())
    }

    /// Builds the provider prompt: narrative context (conversation replay
    /// ending in the `Current request:` sentinel) followed by the request
    /// text. With no history this degrades to the bare prompt.
    async fn build_prompt(&self, session_id: &str, prompt: &str) -> String {
        let context = if self.config.use_relevant_context {
            self.assembler
                .select_relevant(session_id, prompt, self.config.max_context_words)
                .await
        } else {
            self.assembler
                .select_recent(session_id, self.config.max_context_words)
                .await
        };
        let narrative = format_as_narrative(&context, self.config.image_prompt());
        format!("{}{}", narrative, prompt)
    }

    /// Persists the request/response turn pair and settles billing. The
    /// assistant turn carries no text; its `prompt_text` is the fallback
    /// content for future context windows and `image_ref` points at the
    /// stored asset.
    async fn record_result(&self, user_id: &str, session_id: &str, prompt: &str, url: &str) {
        let user_turn = ChatTurn::new(session_id, ChatRole::User, Some(prompt.to_string()));
        if let Err(e) = self.store.append(user_turn).await {
            warn!(session_id, error = %e, "Failed to persist user turn");
        }

        let assistant_turn = ChatTurn::new(session_id, ChatRole::Assistant, None)
            .with_prompt_text(prompt)
            .with_image_ref(url);
        if let Err(e) = self.store.append(assistant_turn).await {
            warn!(session_id, error = %e, "Failed to persist assistant image turn");
        }

        if let Err(e) = self.ledger.debit(user_id, self.config.image_cost).await {
            error!(user_id, error = %e, "Debit after successful generation failed");
        }
    }

    /// Generates an image for `prompt` within the session's context.
    #[instrument(skip(self, prompt), fields(user_id, session_id))]
    pub async fn handle_generate(
        &self,
        user_id: &str,
        session_id: &str,
        prompt: &str,
    ) -> Result<GeneratedImageReply, PixchatError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(HandlerError::EmptyPrompt.into());
        }
        self.check_balance(user_id).await?;

        let full_prompt = self.build_prompt(session_id, prompt).await;
        let bytes = self
            .images
            .generate_image(&full_prompt)
            .await
            .map_err(|e| PixchatError::Provider(e.to_string()))?;

        let name = format!("{}.png", Uuid::new_v4());
        let url = self
            .assets
            .store(&bytes, &name, session_id)
            .await
            .map_err(|e| PixchatError::Database(e.to_string()))?;

        info!(
            user_id,
            session_id,
            url = %url,
            size = bytes.len(),
            "Image generated and stored"
        );

        self.record_result(user_id, session_id, prompt, &url).await;

        Ok(GeneratedImageReply {
            url,
            prompt: prompt.to_string(),
        })
    }

    /// Edits `source` according to `prompt` within the session's context.
    #[instrument(skip(self, source, prompt), fields(user_id, session_id))]
    pub async fn handle_edit(
        &self,
        user_id: &str,
        session_id: &str,
        source: Vec<u8>,
        prompt: &str,
    ) -> Result<GeneratedImageReply, PixchatError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(HandlerError::EmptyPrompt.into());
        }
        self.check_balance(user_id).await?;

        let bytes = self
            .images
            .edit_image(source, prompt)
            .await
            .map_err(|e| PixchatError::Provider(e.to_string()))?;

        let name = format!("{}.png", Uuid::new_v4());
        let url = self
            .assets
            .store(&bytes, &name, session_id)
            .await
            .map_err(|e| PixchatError::Database(e.to_string()))?;

        info!(
            user_id,
            session_id,
            url = %url,
            size = bytes.len(),
            "Image edited and stored"
        );

        self.record_result(user_id, session_id, prompt, &url).await;

        Ok(GeneratedImageReply {
            url,
            prompt: prompt.to_string(),
        })
    }
}
