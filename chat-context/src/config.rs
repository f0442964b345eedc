//! Configuration surface for context assembly.

/// Store fetch bound for the recency-window strategy.
pub const RECENT_FETCH_LIMIT: usize = 50;

/// Store fetch bound for the relevance-ranked strategy.
pub const RELEVANT_FETCH_LIMIT: usize = 100;

/// Number of most-recent turns always seeded into relevance-ranked output.
pub const SEED_RECENT_COUNT: usize = 5;

/// Number of top-scored candidates considered for appending after the seed.
pub const RANKED_POOL_SIZE: usize = 20;

/// Default multiplier applied to the recency bonus in the combined score.
pub const DEFAULT_RECENCY_WEIGHT: f32 = 0.3;

/// Tunable knobs for [`crate::ContextAssembler`].
///
/// The word budget itself is passed per call; everything else that shapes a
/// selection lives here so ranking behavior can be tuned without touching
/// the algorithm.
#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub recent_fetch_limit: usize,
    pub relevant_fetch_limit: usize,
    pub seed_recent_count: usize,
    pub ranked_pool_size: usize,
    pub recency_weight: f32,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            recent_fetch_limit: RECENT_FETCH_LIMIT,
            relevant_fetch_limit: RELEVANT_FETCH_LIMIT,
            seed_recent_count: SEED_RECENT_COUNT,
            ranked_pool_size: RANKED_POOL_SIZE,
            recency_weight: DEFAULT_RECENCY_WEIGHT,
        }
    }
}
