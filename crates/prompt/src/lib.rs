//! # Prompt
//!
//! Prompt-shaping primitives shared by the context formatter and the
//! provider clients.
//!
//! ## Contents
//!
//! - [`MessageRole`] / [`ChatMessage`]: one-to-one with OpenAI Chat
//!   Completions `role` / `messages` entries.
//! - [`image_caption`]: the textual stand-in for a generated image when a
//!   conversation is replayed to a text model.
//! - [`format_narrative`]: flattens prior conversation lines into a single
//!   narrative block ending in a `Current request:` sentinel.
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to LLM APIs (chat-message form) or
//!   embedded in image-generation prompts (narrative form).

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of an OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Section title introducing replayed conversation history.
pub const SECTION_PREVIOUS: &str = "Previous conversation:";

/// Sentinel introducing the caller's current request, appended after history.
pub const SECTION_CURRENT: &str = "Current request:";

/// Caption standing in for a generated image in text-only context.
///
/// Models reading the conversation see what the image was, without the
/// binary payload.
pub fn image_caption(prompt: &str) -> String {
    format!("[Generated image for prompt: \"{}\"]", prompt)
}

/// Builds a narrative context block from pre-formatted "Role: content" lines.
///
/// Shape:
///
/// ```text
/// System: {system_message}
///
/// Previous conversation:
/// User: ...
/// Assistant: ...
///
/// Current request:
/// ```
///
/// The system prefix appears only when `system_message` is given. The
/// conversation header and trailing sentinel appear only when `lines` is
/// non-empty, so an empty history degrades to just the optional prefix.
pub fn format_narrative<L, LI>(system_message: Option<&str>, lines: L) -> String
where
    L: IntoIterator<Item = LI>,
    LI: AsRef<str>,
{
    let mut out = String::new();
    if let Some(msg) = system_message {
        out.push_str("System: ");
        out.push_str(msg);
        out.push_str("\n\n");
    }
    let lines: Vec<String> = lines.into_iter().map(|l| l.as_ref().to_string()).collect();
    if !lines.is_empty() {
        out.push_str(SECTION_PREVIOUS);
        out.push('\n');
        for line in &lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(SECTION_CURRENT);
        out.push('\n');
    }
    out
}
