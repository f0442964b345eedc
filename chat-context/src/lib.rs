//! # Chat Context
//!
//! Assembles a bounded context window of prior conversation turns for AI
//! generation requests.
//!
//! Two selection strategies share a word-budget discipline:
//! - **Recency window** ([`ContextAssembler::select_recent`]): the most
//!   recent turns that fit the budget, oldest-first.
//! - **Relevance ranked** ([`ContextAssembler::select_relevant`]): a seed of
//!   the most recent turns plus the highest-scoring older turns by keyword
//!   overlap with the current request.
//!
//! Assembled turns are projected for two downstream consumers: a role/content
//! message list for chat-completion APIs ([`format_for_chat_api`]) and a
//! single narrative string for prompt-embedding consumers such as image
//! generation ([`format_as_narrative`]).
//!
//! ## Failure policy
//!
//! Context is an enhancement, not a correctness requirement: any store fault
//! degrades to an empty window (logged, never raised), so generation proceeds
//! without conversational memory rather than failing.

mod assembler;
mod config;
mod format;
mod keywords;
mod scoring;

pub use assembler::ContextAssembler;
pub use config::{
    ContextConfig, DEFAULT_RECENCY_WEIGHT, RANKED_POOL_SIZE, RECENT_FETCH_LIMIT,
    RELEVANT_FETCH_LIMIT, SEED_RECENT_COUNT,
};
pub use format::{format_as_narrative, format_for_chat_api};
pub use keywords::{extract_keywords, MAX_KEYWORDS};
pub use scoring::{keyword_score, recency_bonus};
