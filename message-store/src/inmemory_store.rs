//! In-memory implementation of [`MessageStore`].
//!
//! Per-session vectors in insertion order under a `tokio::sync::RwLock`;
//! suitable for tests and local development, data is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use pixchat_core::ChatTurn;
use tokio::sync::RwLock;

use crate::store::MessageStore;

/// In-memory message store for testing and development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    sessions: Arc<RwLock<HashMap<String, Vec<ChatTurn>>>>,
}

impl InMemoryMessageStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of turns stored across all sessions.
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.values().map(|v| v.len()).sum()
    }

    /// Returns true if no turns are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, turn: ChatTurn) -> Result<(), anyhow::Error> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(turn.session_id.clone())
            .or_default()
            .push(turn);
        Ok(())
    }

    /// Stable-sorts the session's turns oldest-first (ties keep insertion
    /// order), then reverses, so equal timestamps come back with the later
    /// append first.
    async fn fetch_recent_turns(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<ChatTurn>, anyhow::Error> {
        let sessions = self.sessions.read().await;
        let mut turns: Vec<ChatTurn> = sessions
            .get(session_id)
            .map(|v| v.clone())
            .unwrap_or_default();

        turns.sort_by_key(|t| t.created_at);
        turns.reverse();
        turns.truncate(limit);
        Ok(turns)
    }

    async fn delete_session(&self, session_id: &str) -> Result<u64, anyhow::Error> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(session_id).map(|v| v.len()).unwrap_or(0);
        Ok(removed as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pixchat_core::ChatRole;

    fn turn_at(session: &str, content: &str, offset_secs: i64) -> ChatTurn {
        let mut turn = ChatTurn::new(session, ChatRole::User, Some(content.to_string()));
        turn.created_at = Utc::now() + Duration::seconds(offset_secs);
        turn
    }

    #[tokio::test]
    async fn test_append_and_fetch_newest_first() {
        let store = InMemoryMessageStore::new();
        store.append(turn_at("s1", "first", 0)).await.unwrap();
        store.append(turn_at("s1", "second", 1)).await.unwrap();
        store.append(turn_at("s1", "third", 2)).await.unwrap();

        let turns = store.fetch_recent_turns("s1", 10).await.unwrap();
        let contents: Vec<_> = turns.iter().map(|t| t.text.clone().unwrap()).collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_fetch_respects_limit() {
        let store = InMemoryMessageStore::new();
        for i in 0..5 {
            store
                .append(turn_at("s1", &format!("m{}", i), i))
                .await
                .unwrap();
        }

        let turns = store.fetch_recent_turns("s1", 2).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text.as_deref(), Some("m4"));
    }

    #[tokio::test]
    async fn test_timestamp_ties_break_by_insertion_order() {
        let store = InMemoryMessageStore::new();
        let ts = Utc::now();
        for name in ["a", "b", "c"] {
            let mut turn = ChatTurn::new("s1", ChatRole::User, Some(name.to_string()));
            turn.created_at = ts;
            store.append(turn).await.unwrap();
        }

        let turns = store.fetch_recent_turns("s1", 10).await.unwrap();
        let contents: Vec<_> = turns.iter().map(|t| t.text.clone().unwrap()).collect();
        // Later append is the newer turn.
        assert_eq!(contents, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = InMemoryMessageStore::new();
        store.append(turn_at("s1", "mine", 0)).await.unwrap();
        store.append(turn_at("s2", "other", 0)).await.unwrap();

        let turns = store.fetch_recent_turns("s1", 10).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].text.as_deref(), Some("mine"));
    }

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let store = InMemoryMessageStore::new();
        let turns = store.fetch_recent_turns("nope", 10).await.unwrap();
        assert!(turns.is_empty());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let store = InMemoryMessageStore::new();
        store.append(turn_at("s1", "a", 0)).await.unwrap();
        store.append(turn_at("s1", "b", 1)).await.unwrap();

        let removed = store.delete_session("s1").await.unwrap();
        assert_eq!(removed, 2);
        assert!(store.is_empty().await);
    }
}
