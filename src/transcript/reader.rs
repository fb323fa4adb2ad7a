//! Transcript file parsing

use crate::transcript::Utterance;

/// Parse a `"Speaker: text"` transcript into utterances.
///
/// Blank lines are skipped. A line without a `:` separator is attributed
/// to the previous speaker, or to "Unknown" at the start of the file.
/// Text after the first `:` may itself contain colons.
pub fn parse_transcript(content: &str) -> Vec<Utterance> {
    let mut utterances = Vec::new();
    let mut last_speaker = String::from("Unknown");

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (speaker, text) = match line.split_once(':') {
            Some((speaker, text)) if !speaker.trim().is_empty() => {
                last_speaker = speaker.trim().to_string();
                (last_speaker.clone(), text.trim().to_string())
            }
            _ => (last_speaker.clone(), line.to_string()),
        };

        if text.is_empty() {
            continue;
        }

        utterances.push(Utterance::new(speaker, text));
    }

    utterances
}
