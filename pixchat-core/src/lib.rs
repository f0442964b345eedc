//! # pixchat-core
//!
//! Shared types and infrastructure for the pixchat workspace: chat turn
//! models, error types, and tracing initialization.
//!
//! ## Modules
//!
//! - [`types`] - Chat roles, stored turns, and assembled context turns
//! - [`error`] - Workspace error enums
//! - [`logger`] - Tracing subscriber setup

pub mod error;
pub mod logger;
pub mod types;

pub use error::{HandlerError, PixchatError, Result};
pub use types::{ChatRole, ChatTurn, ContextTurn};
