//! recap - Session transcript capture and AI-powered summary generation
//!
//! Collects attributed utterances from a live session, builds a bounded
//! summarization prompt, delivers it to a generative-language provider
//! (with an optional backend relay as fallback), and renders the result.

pub mod cli;
pub mod config;
pub mod present;
pub mod session;
pub mod summary;
pub mod transcript;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "recap";
