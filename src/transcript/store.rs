//! Append-only utterance log with point-in-time snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::warn;

/// One attributed, timestamped unit of transcribed speech
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    /// Who said it (participant display name)
    pub speaker: String,

    /// What was said, non-empty after trimming
    pub text: String,

    /// When it was captured
    pub timestamp: DateTime<Utc>,
}

impl Utterance {
    /// Create an utterance timestamped now
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Serialize as a single transcript line
    pub fn as_line(&self) -> String {
        format!("{}: {}", self.speaker, self.text)
    }
}

/// Immutable point-in-time copy of the transcript.
///
/// Owned by the summary request it was taken for; snapshots taken from the
/// same store share no mutable state.
#[derive(Debug, Clone)]
pub struct TranscriptSnapshot {
    utterances: Vec<Utterance>,
}

impl TranscriptSnapshot {
    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    pub fn len(&self) -> usize {
        self.utterances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utterances.is_empty()
    }

    /// Join all utterances as `"speaker: text"` lines
    pub fn joined_text(&self) -> String {
        self.utterances
            .iter()
            .map(Utterance::as_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Ordered, append-only log of session speech.
///
/// Written by a single transcription producer and read by the summary
/// workflow; access is serialized so snapshot order always matches
/// arrival order.
#[derive(Debug, Default)]
pub struct TranscriptStore {
    entries: Mutex<VecDeque<Utterance>>,

    /// Maximum retained utterances (0 = unbounded). When the cap is hit
    /// the oldest entry is evicted so the most recent speech is kept.
    max_utterances: usize,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity_limit(max_utterances: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            max_utterances,
        }
    }

    /// Append an utterance in arrival order.
    ///
    /// Utterances with blank text are dropped; repeated identical
    /// utterances are kept as distinct entries (real speech repeats).
    pub fn append(&self, utterance: Utterance) {
        if utterance.text.trim().is_empty() {
            warn!(speaker = %utterance.speaker, "Dropping utterance with empty text");
            return;
        }

        let mut entries = self.entries.lock().expect("transcript lock poisoned");
        if self.max_utterances > 0 && entries.len() >= self.max_utterances {
            warn!(
                cap = self.max_utterances,
                "Transcript cap reached, evicting oldest utterance"
            );
            entries.pop_front();
        }
        entries.push_back(utterance);
    }

    /// Number of stored utterances
    pub fn len(&self) -> usize {
        self.entries.lock().expect("transcript lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take an immutable copy of the full ordered sequence.
    ///
    /// Safe to call at any time; an empty store yields an empty snapshot.
    pub fn snapshot(&self) -> TranscriptSnapshot {
        TranscriptSnapshot {
            utterances: self
                .entries
                .lock()
                .expect("transcript lock poisoned")
                .iter()
                .cloned()
                .collect(),
        }
    }
}
