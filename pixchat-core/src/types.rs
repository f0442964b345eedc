//! Core types: chat roles, stored turns, and assembled context turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    /// Capitalized label used in narrative prompts ("User", "Assistant", "System").
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
            ChatRole::System => "System",
        }
    }
}

/// A single stored chat turn belonging to a session.
///
/// `text` carries the primary content. Assistant turns that produced an
/// image may have no `text`; their `prompt_text` (the prompt the image was
/// generated from) serves as fallback content. A turn with neither is
/// invisible to context assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Unique identifier
    pub id: Uuid,
    /// Session (conversation thread) this turn belongs to
    pub session_id: String,
    /// Role of the sender
    pub role: ChatRole,
    /// Primary message content
    pub text: Option<String>,
    /// Prompt that produced an assistant image; fallback content
    pub prompt_text: Option<String>,
    /// URL of a generated or uploaded image
    pub image_ref: Option<String>,
    /// When the turn was created
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Creates a new turn with a generated UUID and the current timestamp.
    pub fn new(session_id: impl Into<String>, role: ChatRole, text: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id: session_id.into(),
            role,
            text,
            prompt_text: None,
            image_ref: None,
            created_at: Utc::now(),
        }
    }

    /// Attaches the prompt text of a generated image.
    pub fn with_prompt_text(mut self, prompt_text: impl Into<String>) -> Self {
        self.prompt_text = Some(prompt_text.into());
        self
    }

    /// Attaches an image URL.
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Resolves the displayable content: `text` if non-empty after trimming,
    /// else `prompt_text`, else `None`.
    pub fn content(&self) -> Option<&str> {
        match self.text.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Some(t),
            _ => match self.prompt_text.as_deref().map(str::trim) {
                Some(p) if !p.is_empty() => Some(p),
                _ => None,
            },
        }
    }
}

/// One entry of an assembled context window, ready for formatting.
///
/// Produced by the context assembler from stored [`ChatTurn`]s; content is
/// already resolved and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextTurn {
    pub role: ChatRole,
    pub content: String,
    pub image_ref: Option<String>,
}

impl ContextTurn {
    /// Builds a context turn from a stored turn, or `None` when the turn
    /// has no resolvable content.
    pub fn from_turn(turn: &ChatTurn) -> Option<Self> {
        turn.content().map(|content| Self {
            role: turn.role,
            content: content.to_string(),
            image_ref: turn.image_ref.clone(),
        })
    }
}
