//! Text chat flow: context assembly, LLM call, persistence, billing.

use std::sync::Arc;

use chat_context::{format_for_chat_api, ContextAssembler};
use credit_ledger::CreditLedger;
use llm_client::LlmClient;
use message_store::MessageStore;
use pixchat_core::{ChatRole, ChatTurn, HandlerError, PixchatError};
use prompt::ChatMessage;
use tracing::{error, info, instrument, warn};

use crate::config::ChatHandlerConfig;

/// Handles one text chat request end to end.
///
/// **External interactions:**
/// - **MessageStore** (via `store`): read prior turns for context, write the
///   user and assistant turns.
/// - **CreditLedger** (via `ledger`): balance check before the provider
///   call, debit after it succeeds.
/// - **LlmClient** (via `llm`): chat completion over the formatted context.
pub struct ChatHandler {
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn MessageStore>,
    ledger: Arc<dyn CreditLedger>,
    assembler: ContextAssembler,
    config: ChatHandlerConfig,
}

impl ChatHandler {
    /// Constructs a `ChatHandler`. Stores dependencies only; no I/O.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn MessageStore>,
        ledger: Arc<dyn CreditLedger>,
        config: ChatHandlerConfig,
    ) -> Self {
        let assembler = ContextAssembler::new(store.clone());
        Self {
            llm,
            store,
            ledger,
            assembler,
            config,
        }
    }

    /// Assembles the context window for the current request, using the
    /// strategy selected by configuration. An empty window means "no prior
    /// context", never an error.
    async fn build_context(&self, session_id: &str, text: &str) -> Vec<pixchat_core::ContextTurn> {
        if self.config.use_relevant_context {
            self.assembler
                .select_relevant(session_id, text, self.config.max_context_words)
                .await
        } else {
            self.assembler
                .select_recent(session_id, self.config.max_context_words)
                .await
        }
    }

    /// Charges the configured cost once a reply exists. Billing after the
    /// fact is best-effort: a failed debit is logged, not returned, so the
    /// user still gets the reply that was already generated.
    async fn settle(&self, user_id: &str, amount: i64) {
        if let Err(e) = self.ledger.debit(user_id, amount).await {
            error!(user_id, amount, error = %e, "Debit after successful generation failed");
        }
    }

    /// Processes one chat message and returns the assistant's reply.
    #[instrument(skip(self, text), fields(user_id, session_id))]
    pub async fn handle_chat(
        &self,
        user_id: &str,
        session_id: &str,
        text: &str,
    ) -> Result<String, PixchatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(HandlerError::NoText.into());
        }

        let available = self
            .ledger
            .balance(user_id)
            .await
            .map_err(|e| PixchatError::Database(e.to_string()))?;
        if available < self.config.chat_cost {
            return Err(HandlerError::InsufficientCredits {
                needed: self.config.chat_cost,
                available,
            }
            .into());
        }

        let context = self.build_context(session_id, text).await;
        let mut messages = format_for_chat_api(&context, self.config.system_prompt.as_deref());
        messages.push(ChatMessage::user(text));

        info!(
            user_id,
            session_id,
            context_turns = context.len(),
            message_count = messages.len(),
            "Dispatching chat completion"
        );

        let user_turn = ChatTurn::new(session_id, ChatRole::User, Some(text.to_string()));
        if let Err(e) = self.store.append(user_turn).await {
            warn!(session_id, error = %e, "Failed to persist user turn");
        }

        let reply = self
            .llm
            .chat_completion(messages)
            .await
            .map_err(|e| PixchatError::Provider(e.to_string()))?;

        let assistant_turn = ChatTurn::new(session_id, ChatRole::Assistant, Some(reply.clone()));
        if let Err(e) = self.store.append(assistant_turn).await {
            warn!(session_id, error = %e, "Failed to persist assistant turn");
        }

        self.settle(user_id, self.config.chat_cost).await;

        Ok(reply)
    }
}
