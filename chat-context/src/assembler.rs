//! Context assembly strategies over the message store.

use std::collections::HashSet;
use std::sync::Arc;

use message_store::MessageStore;
use pixchat_core::{ChatRole, ContextTurn};
use tracing::{debug, info, warn};

use crate::config::ContextConfig;
use crate::keywords::extract_keywords;
use crate::scoring::{keyword_score, recency_bonus};

/// Assembles bounded context windows from a session's stored turns.
///
/// Stateless between calls: every selection re-reads the store, and the
/// produced [`ContextTurn`] sequences are ephemeral. The store read is the
/// only fallible step and is swallowed: a failed fetch yields an empty
/// window so the caller's generation flow proceeds context-free.
pub struct ContextAssembler {
    store: Arc<dyn MessageStore>,
    config: ContextConfig,
}

/// Counts whitespace-delimited words; empty tokens do not count.
fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

impl ContextAssembler {
    /// Creates an assembler with default configuration.
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self {
            store,
            config: ContextConfig::default(),
        }
    }

    /// Creates an assembler with explicit configuration.
    pub fn with_config(store: Arc<dyn MessageStore>, config: ContextConfig) -> Self {
        Self { store, config }
    }

    /// Selects the most recent turns that fit the word budget, oldest-first.
    ///
    /// Turns without resolvable content are skipped. Accumulation stops at
    /// the first turn that would overflow the budget once anything has been
    /// accepted; a first turn that alone exceeds the budget is still
    /// included so a non-empty history never produces an empty window.
    pub async fn select_recent(&self, session_id: &str, max_words: usize) -> Vec<ContextTurn> {
        let turns = match self
            .store
            .fetch_recent_turns(session_id, self.config.recent_fetch_limit)
            .await
        {
            Ok(turns) => turns,
            Err(e) => {
                warn!(session_id, error = %e, "Context fetch failed, proceeding without context");
                return Vec::new();
            }
        };

        let mut selected = Vec::new();
        let mut used_words = 0;
        for turn in turns.iter().rev() {
            let Some(ctx) = ContextTurn::from_turn(turn) else {
                continue;
            };
            let words = word_count(&ctx.content);
            if used_words + words > max_words && !selected.is_empty() {
                break;
            }
            used_words += words;
            selected.push(ctx);
        }

        debug!(
            session_id,
            turn_count = selected.len(),
            used_words,
            max_words,
            "Selected recent context"
        );
        selected
    }

    /// Selects a relevance-ranked window for the current request text.
    ///
    /// Every stored turn is scored by keyword overlap with `current_text`
    /// plus a weighted rank bonus; the top candidates are then appended
    /// after a seed of the most recent turns. The output is the seed block
    /// (oldest-first) followed by appended turns in descending-score order,
    /// deliberately not one chronological sequence, since the ranked block
    /// is reference material rather than dialogue replay.
    ///
    /// The seed phase uses the same budget rule as [`Self::select_recent`]
    /// (first-item exception included); the append phase is strict and stops
    /// outright at the first turn that would overflow. No `(role, content)`
    /// pair ever appears twice.
    pub async fn select_relevant(
        &self,
        session_id: &str,
        current_text: &str,
        max_words: usize,
    ) -> Vec<ContextTurn> {
        let turns = match self
            .store
            .fetch_recent_turns(session_id, self.config.relevant_fetch_limit)
            .await
        {
            Ok(turns) => turns,
            Err(e) => {
                warn!(session_id, error = %e, "Context fetch failed, proceeding without context");
                return Vec::new();
            }
        };
        if turns.is_empty() {
            return Vec::new();
        }

        let current_keywords = extract_keywords(current_text);
        let total = turns.len();

        // Score every turn with resolvable content against the current
        // request; position is its rank in the newest-first fetch.
        let mut scored: Vec<(f32, ContextTurn)> = Vec::new();
        for (position, turn) in turns.iter().enumerate() {
            let Some(ctx) = ContextTurn::from_turn(turn) else {
                continue;
            };
            let turn_keywords = extract_keywords(&ctx.content);
            let score = keyword_score(&current_keywords, &turn_keywords)
                + self.config.recency_weight * recency_bonus(position, total);
            scored.push((score, ctx));
        }

        // Stable sort: equal scores keep their newest-first relative order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(self.config.ranked_pool_size);

        let mut selected = Vec::new();
        let mut seen: HashSet<(ChatRole, String)> = HashSet::new();
        let mut used_words = 0;

        // Seed: the most recent turns, oldest-first among themselves.
        let seed_count = self.config.seed_recent_count.min(turns.len());
        for turn in turns[..seed_count].iter().rev() {
            let Some(ctx) = ContextTurn::from_turn(turn) else {
                continue;
            };
            let key = (ctx.role, ctx.content.clone());
            if seen.contains(&key) {
                continue;
            }
            let words = word_count(&ctx.content);
            if used_words + words > max_words && !selected.is_empty() {
                break;
            }
            used_words += words;
            seen.insert(key);
            selected.push(ctx);
        }
        let seed_len = selected.len();

        // Append ranked candidates not already present, strict budget.
        for (_score, ctx) in scored {
            let key = (ctx.role, ctx.content.clone());
            if seen.contains(&key) {
                continue;
            }
            let words = word_count(&ctx.content);
            if used_words + words > max_words {
                break;
            }
            used_words += words;
            seen.insert(key);
            selected.push(ctx);
        }

        info!(
            session_id,
            fetched = total,
            seeded = seed_len,
            appended = selected.len() - seed_len,
            used_words,
            max_words,
            "Selected relevance-ranked context"
        );
        selected
    }
}
