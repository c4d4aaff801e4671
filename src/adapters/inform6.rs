//! Inform6 `gametext.txt` transcript input dialect.
//!
//! Each line is `X:text` where `X` names a record kind. Only `G`, `V`, `L`,
//! `O`, `S`, `H`, `W` are indexed; `I:` lines carry metadata instead of text.

use crate::adapters::encoding::substitute_sentinels;
use crate::corpus::{Corpus, StringRecord};
use crate::zversion::ZVersion;

/// Result of parsing one transcript.
pub struct TranscriptResult {
    pub corpus: Corpus,
    pub version: Option<ZVersion>,
}

/// Parse a whole `gametext.txt` transcript.
pub fn parse_transcript(text: &str) -> TranscriptResult {
    let mut corpus = Corpus::new();
    let mut version = None;
    let mut next_routine_id: u32 = 0;
    // Count of `O:` lines seen so far; the first four are metaclass
    // artifacts (Class, Object, Routine, String) and are dropped.
    let mut object_lines_seen: u32 = 0;

    for line in text.lines() {
        let Some((kind, rest)) = line.split_once(':') else {
            continue;
        };
        let mut kind_chars = kind.chars();
        let Some(kind) = kind_chars.next() else {
            continue;
        };
        if kind_chars.next().is_some() {
            continue; // not a single-letter record kind
        }

        match kind {
            'I' => {
                if let Some(v) = parse_compiled_version(rest) {
                    version = Some(v);
                } else if let Some(size) = parse_routine_size(rest) {
                    corpus.routine_sizes.insert(next_routine_id, size);
                    next_routine_id += 1;
                }
            }
            'O' => {
                object_lines_seen += 1;
                if object_lines_seen <= 4 {
                    continue; // metaclass artifact, not a real object
                }
                push_record(&mut corpus, rest, false, true, None);
            }
            'G' | 'V' | 'S' => push_record(&mut corpus, rest, true, false, None),
            'H' => {
                let routine_id = next_routine_id.saturating_sub(1);
                push_record(&mut corpus, rest, false, false, Some(routine_id));
            }
            'L' | 'W' => push_record(&mut corpus, rest, false, false, None),
            _ => {} // A, D, X and anything else: not indexed
        }
    }

    TranscriptResult { corpus, version }
}

fn push_record(
    corpus: &mut Corpus,
    raw_text: &str,
    packed: bool,
    object_description: bool,
    routine_id: Option<u32>,
) {
    let mapped = map_transcript_sentinels(raw_text);
    if let Ok(substituted) = substitute_sentinels(&mapped) {
        corpus.push(StringRecord::new(
            substituted,
            packed,
            object_description,
            routine_id,
        ));
    }
}

/// The transcript itself already uses `^`/`~`/space in place of LF/quote/
/// space; map those onto the corpus's own sentinel characters
/// before the normal substitution pass, which only touches raw space/quote/
/// LF (there are none left to touch once this runs).
fn map_transcript_sentinels(s: &str) -> String {
    use crate::alphabet::{LF_SENTINEL, QUOTE_SENTINEL};
    s.chars()
        .map(|c| match c {
            '^' => LF_SENTINEL,
            '~' => QUOTE_SENTINEL,
            other => other,
        })
        .collect()
}

fn parse_compiled_version(rest: &str) -> Option<ZVersion> {
    let marker = "[Compiled Z-machine version ";
    let start = rest.find(marker)? + marker.len();
    let digit = rest[start..].chars().next()?.to_digit(10)?;
    ZVersion::from_digit(digit as u8)
}

fn parse_routine_size(rest: &str) -> Option<u32> {
    if !rest.contains("without inline strings size:") {
        return None;
    }
    let marker = "without inline strings size:";
    let start = rest.find(marker)? + marker.len();
    rest[start..].split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_only_named_kinds() {
        let transcript = "G:grue\nA:ignored\nX:ignored\nW:west\n";
        let result = parse_transcript(transcript);
        assert_eq!(result.corpus.len(), 2);
    }

    #[test]
    fn g_v_s_are_packed() {
        let transcript = "G:grue\nV:verb\nS:status\n";
        let result = parse_transcript(transcript);
        assert!(result.corpus.strings.iter().all(|s| s.packed));
    }

    #[test]
    fn first_four_object_lines_are_dropped() {
        let transcript = "O:Class\nO:Object\nO:Routine\nO:String\nO:a grue\n";
        let result = parse_transcript(transcript);
        assert_eq!(result.corpus.len(), 1);
        assert!(result.corpus.strings[0].object_description);
    }

    #[test]
    fn h_lines_capture_routine_id() {
        let transcript =
            "I:[Compiled Z-machine version 5]\nI: without inline strings size: 10 \nH:inline text\n";
        let result = parse_transcript(transcript);
        assert_eq!(result.version, Some(ZVersion::V5));
        assert_eq!(result.corpus.strings[0].routine_id, Some(0));
        assert_eq!(result.corpus.routine_sizes.get(&0), Some(&10));
    }

    #[test]
    fn transcript_sentinels_map_to_corpus_sentinels() {
        let transcript = "L:a^b~c d\n";
        let result = parse_transcript(transcript);
        let text =
            crate::adapters::encoding::restore_sentinels(result.corpus.strings[0].text());
        assert_eq!(text, "a\nb\"c d");
    }
}
