//! Summary prompt construction

use crate::summary::{SummaryError, SummaryRequest};
use crate::transcript::TranscriptSnapshot;

/// Minimum concatenated transcript length worth summarizing
pub const MIN_TRANSCRIPT_CHARS: usize = 50;

/// Compose a summarization request from a transcript snapshot.
///
/// Fails with [`SummaryError::EmptyTranscript`] before any network
/// activity when the snapshot is empty or the joined text is below
/// [`MIN_TRANSCRIPT_CHARS`]. The transcript is embedded as opaque text;
/// it is never interpreted as template syntax.
pub fn build_request(snapshot: &TranscriptSnapshot) -> Result<SummaryRequest, SummaryError> {
    if snapshot.is_empty() {
        return Err(SummaryError::EmptyTranscript);
    }

    let transcript_text = snapshot.joined_text();
    if transcript_text.trim().len() < MIN_TRANSCRIPT_CHARS {
        return Err(SummaryError::EmptyTranscript);
    }

    let prompt_text = build_summary_prompt(&transcript_text);

    Ok(SummaryRequest {
        prompt_text,
        transcript_text,
        source_transcript_len: snapshot.len(),
    })
}

/// Build a deterministic summary prompt for a session transcript.
fn build_summary_prompt(transcript: &str) -> String {
    format!(
        "You are an assistant that writes concise, factual summaries of \
one-on-one skill-sharing sessions.\n\
\n\
Return Markdown with exactly these sections:\n\
1. **Session Summary** (2-3 sentences)\n\
2. **Key Topics** (bullets)\n\
3. **Learning Outcomes** (bullets)\n\
4. **Important Points** (bullets)\n\
5. **Next Steps** (bullets)\n\
\n\
Rules:\n\
- Use only information present in the transcript.\n\
- If a section has no content, write 'None'.\n\
- Keep each bullet short and concrete.\n\
\n\
Transcript:\n\
{transcript}"
    )
}
