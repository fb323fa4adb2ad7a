//! Transcript module for recap
//!
//! In-memory, append-only log of attributed utterances plus a reader for
//! `"Speaker: text"` transcript files.

mod reader;
mod store;

pub use reader::parse_transcript;
pub use store::{TranscriptSnapshot, TranscriptStore, Utterance};
