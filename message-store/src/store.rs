//! Message store interface.

use async_trait::async_trait;
use pixchat_core::ChatTurn;

/// Trait for storing and retrieving chat turns.
///
/// Turns are append-only; within a session they are totally ordered by
/// `created_at`, ties broken by insertion order. Retrieval is newest-first
/// so callers can bound reads to the most recent slice of a conversation.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Appends a turn to its session.
    async fn append(&self, turn: ChatTurn) -> Result<(), anyhow::Error>;

    /// Returns up to `limit` most recent turns for a session, newest-first.
    /// Turns sharing a timestamp rank in reverse insertion order (the later
    /// append is the newer turn).
    async fn fetch_recent_turns(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatTurn>, anyhow::Error>;

    /// Deletes every turn of a session; returns the number removed.
    async fn delete_session(&self, session_id: &str) -> Result<u64, anyhow::Error>;
}
