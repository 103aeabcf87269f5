//! # Florakg LLM
//!
//! Hosted text-completion client used by the grounded answer strategy.

pub mod chat;

pub use chat::ChatClient;
