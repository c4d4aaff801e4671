//! Encoding detection and sentinel substitution.

use crate::alphabet::{LF_SENTINEL, QUOTE_SENTINEL, SPACE_SENTINEL};

/// Source character-set override (`-c0|-cu|-c1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetOverride {
    /// `-c0`: 7-bit ASCII (a stricter subset of Latin-1; decoded the same way).
    Ascii,
    /// `-cu`: force UTF-8.
    Utf8,
    /// `-c1`: force Latin-1 (ISO-8859-1), one byte per character.
    Latin1,
}

impl std::str::FromStr for CharsetOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "ascii" => Ok(CharsetOverride::Ascii),
            "u" | "utf8" | "utf-8" => Ok(CharsetOverride::Utf8),
            "1" | "latin1" | "latin-1" => Ok(CharsetOverride::Latin1),
            other => Err(format!("unrecognized charset override {other:?}")),
        }
    }
}

/// Decode raw bytes into a `String`, honoring an explicit override or
/// falling back from strict UTF-8 to Latin-1.
pub fn decode(bytes: &[u8], overrid: Option<CharsetOverride>) -> String {
    match overrid {
        Some(CharsetOverride::Latin1) => decode_latin1(bytes),
        Some(CharsetOverride::Ascii) | Some(CharsetOverride::Utf8) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
        None => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_owned(),
            Err(_) => decode_latin1(bytes),
        },
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Replace raw space/quote/LF with their in-band sentinels on ingestion.
/// Validates the separator byte is absent, since it must stay reserved for
/// the suffix array's generalized-string concatenation.
pub fn substitute_sentinels(raw: &str) -> Result<String, SeparatorPresentError> {
    if raw.as_bytes().contains(&crate::config::SEPARATOR) {
        return Err(SeparatorPresentError);
    }
    Ok(raw
        .chars()
        .map(|c| match c {
            ' ' => SPACE_SENTINEL,
            '"' => QUOTE_SENTINEL,
            '\n' => LF_SENTINEL,
            other => other,
        })
        .collect())
}

/// Restore sentinels to their raw characters on output.
pub fn restore_sentinels(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            SPACE_SENTINEL => ' ',
            QUOTE_SENTINEL => '"',
            LF_SENTINEL => '\n',
            other => other,
        })
        .collect()
}

/// The separator byte appeared in raw input before ingestion
/// could substitute it away — this should never happen given it's a
/// non-printable control character, but is checked defensively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorPresentError;

impl std::fmt::Display for SeparatorPresentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "input contains the reserved separator byte (0x0B)")
    }
}

impl std::error::Error for SeparatorPresentError {}
