//! # Chat Handlers
//!
//! Caller-level orchestration for the pixchat flows. Each handler wires the
//! service crates together around one request:
//!
//! - [`ChatHandler`]: balance check → context assembly → chat completion →
//!   persist turns → debit.
//! - [`ImageHandler`]: balance check → narrative context → image
//!   generation/edit → asset upload → persist turns → debit.
//! - [`SessionManager`]: removes a session's turns and its asset folder.
//!
//! Billing discipline: a provider failure never debits; a debit failure
//! after a successful reply is logged and the reply still returned.

mod chat_handler;
mod config;
mod image_handler;
mod session;

pub use chat_handler::ChatHandler;
pub use config::ChatHandlerConfig;
pub use image_handler::{GeneratedImageReply, ImageHandler};
pub use session::SessionManager;
