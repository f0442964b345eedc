//! Projections of an assembled context window for downstream providers.
//!
//! Two consumers read context differently: chat-completion APIs take a
//! role/content message list, while prompt-embedding consumers (image
//! generation) take one narrative string. Both rewrite assistant image
//! turns to a textual caption so text models can see what was generated.

use pixchat_core::{ChatRole, ContextTurn};
use prompt::{image_caption, ChatMessage, MessageRole};

fn to_message_role(role: ChatRole) -> MessageRole {
    match role {
        ChatRole::User => MessageRole::User,
        ChatRole::Assistant => MessageRole::Assistant,
        ChatRole::System => MessageRole::System,
    }
}

/// Resolved display content for a turn: assistant turns carrying an image
/// are captioned, everything else passes through unchanged.
fn display_content(turn: &ContextTurn) -> String {
    if turn.role == ChatRole::Assistant && turn.image_ref.is_some() {
        image_caption(&turn.content)
    } else {
        turn.content.clone()
    }
}

/// Projects context turns into a chat-completion message list.
///
/// An optional system prompt is prepended; turn order is preserved exactly
/// as received.
pub fn format_for_chat_api(turns: &[ContextTurn], system_prompt: Option<&str>) -> Vec<ChatMessage> {
    let mut messages = Vec::new();
    if let Some(sp) = system_prompt {
        messages.push(ChatMessage::system(sp));
    }
    for turn in turns {
        messages.push(ChatMessage {
            role: to_message_role(turn.role),
            content: display_content(turn),
        });
    }
    messages
}

/// Projects context turns into a single narrative block.
///
/// Shape (see `prompt::format_narrative`): optional `System:` prefix, then a
/// `Previous conversation:` section with one `Role: content` line per turn
/// and a trailing `Current request:` sentinel. With no turns, only the
/// optional prefix is produced.
pub fn format_as_narrative(turns: &[ContextTurn], system_prompt: Option<&str>) -> String {
    let lines: Vec<String> = turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), display_content(turn)))
        .collect();
    prompt::format_narrative(system_prompt, lines)
}
