//! Summary module for recap
//!
//! Prompt construction, delivery routes (Gemini API, backend relay), and
//! the normalized failure taxonomy for the session-summary workflow.

mod backend;
mod client;
mod gemini;
mod prompt;

pub use backend::BackendClient;
pub use client::{build_delivery_chain, DeliveryRoute, SummaryProvider};
pub use gemini::GeminiClient;
pub use prompt::{build_request, MIN_TRANSCRIPT_CHARS};

use thiserror::Error;

/// Failure taxonomy for summary generation.
///
/// Each variant maps to a distinct, user-visible failure mode; the
/// workflow never collapses them into a single opaque error.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Transcript is empty or too short to summarize; nothing was sent
    #[error("Transcript is empty or too short for a meaningful summary")]
    EmptyTranscript,

    /// No API credential configured; nothing was sent
    #[error("No API credential configured: {0}")]
    CredentialMissing(String),

    /// Network-level failure, no response received (includes timeouts)
    #[error("Network error: {0}")]
    Transport(String),

    /// Response received with a non-success status code
    #[error("Provider rejected the request with status {status}: {message}")]
    Provider { status: u16, message: String },

    /// Success status but the expected payload was missing; indicates an
    /// API contract change rather than a request-level rejection
    #[error("Provider response missing expected payload: {0}")]
    MalformedResponse(String),
}

/// A composed summarization request, bound to one transcript snapshot.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// Full prompt: instructional template with the transcript embedded
    pub prompt_text: String,

    /// Serialized `"speaker: text"` transcript, used by the relay route
    pub transcript_text: String,

    /// Number of utterances in the source snapshot
    pub source_transcript_len: usize,
}

/// A summary the workflow can present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Genuine provider output, tagged with the route that produced it
    Generated { text: String, route: DeliveryRoute },

    /// Synthetic stand-in shown only when every route failed and the
    /// placeholder policy is enabled; always rendered with an explicit
    /// label, never passed off as a genuine result
    Placeholder { text: String },
}

impl SummaryOutcome {
    /// The summary text regardless of origin
    pub fn text(&self) -> &str {
        match self {
            Self::Generated { text, .. } => text,
            Self::Placeholder { text } => text,
        }
    }
}
