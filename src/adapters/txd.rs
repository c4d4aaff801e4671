//! Infodump (`-io`) + TXD (`-ag`) input dialect.
//!
//! Infodump's object dump supplies object short descriptions; TXD's
//! disassembly supplies `PRINT`/`PRINT_RET` inline strings from the code
//! area plus packed high-memory strings listed after `End of code`.

use crate::adapters::encoding::substitute_sentinels;
use crate::corpus::{Corpus, StringRecord};

/// Parse an Infodump `-io` object dump: lines of the form
/// `Short name: "a grue"`.
pub fn parse_infodump(text: &str, corpus: &mut Corpus) {
    let marker = "Short name:";
    for line in text.lines() {
        let Some(idx) = line.find(marker) else {
            continue;
        };
        if let Some(desc) = extract_quoted(&line[idx + marker.len()..]) {
            push(corpus, &desc, false, true);
        }
    }
}

/// Parse a TXD `-ag` disassembly: `PRINT`/`PRINT_RET` strings in the code
/// area (inline), and quoted strings following the `End of code` marker
/// (packed, high memory).
pub fn parse_txd(text: &str, corpus: &mut Corpus) {
    let mut past_end_of_code = false;
    for line in text.lines() {
        if line.contains("End of code") {
            past_end_of_code = true;
            continue;
        }

        if past_end_of_code {
            if let Some(desc) = extract_quoted(line) {
                push(corpus, &desc, true, false);
            }
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with("PRINT_RET") || trimmed.starts_with("PRINT") {
            if let Some(desc) = extract_quoted(trimmed) {
                push(corpus, &desc, false, false);
            }
        }
    }
}

fn push(corpus: &mut Corpus, raw_text: &str, packed: bool, object_description: bool) {
    if let Ok(substituted) = substitute_sentinels(raw_text) {
        corpus.push(StringRecord::new(substituted, packed, object_description, None));
    }
}

/// Capture the first `"..."`-delimited run on a line, `""` being an escaped
/// literal quote (mirrors `adapters::zap`'s escaping rule).
fn extract_quoted(s: &str) -> Option<String> {
    let start = s.find('"')? + 1;
    let body = &s[start..];
    let mut out = String::new();
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                out.push('"');
                chars.next();
                continue;
            }
            return Some(out);
        }
        out.push(c);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infodump_captures_short_names() {
        let mut corpus = Corpus::new();
        parse_infodump("Object 12\n  Short name: \"a grue\"\n", &mut corpus);
        assert_eq!(corpus.len(), 1);
        assert!(corpus.strings[0].object_description);
        assert!(!corpus.strings[0].packed);
    }

    #[test]
    fn txd_captures_inline_prints_before_end_of_code() {
        let mut corpus = Corpus::new();
        parse_txd("    PRINT \"hello\"\n    PRINT_RET \"bye\"\n", &mut corpus);
        assert_eq!(corpus.len(), 2);
        assert!(corpus.strings.iter().all(|s| !s.packed));
    }

    #[test]
    fn txd_captures_packed_strings_after_end_of_code() {
        let mut corpus = Corpus::new();
        parse_txd("End of code\n\"a high string\"\n", &mut corpus);
        assert_eq!(corpus.len(), 1);
        assert!(corpus.strings[0].packed);
        assert!(!corpus.strings[0].object_description);
    }
}
