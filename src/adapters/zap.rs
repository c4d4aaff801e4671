//! ZAP input dialect.
//!
//! Scans every `.zap` file in a game directory whose name does not contain
//! `_freq`, capturing the bracketed string following `.GSTR`, `.STRL`,
//! `PRINTI`, or `PRINTR` directives.

use std::path::Path;

use walkdir::WalkDir;

use crate::adapters::encoding::{decode, substitute_sentinels, CharsetOverride};
use crate::corpus::{Corpus, StringRecord};
use crate::zversion::ZVersion;

/// Everything a directory scan yields: the corpus plus any z-version found
/// via a `.NEW N` directive.
pub struct ZapScanResult {
    pub corpus: Corpus,
    pub version: Option<ZVersion>,
}

/// Scan `dir` for `.zap` files.
pub fn scan_directory(
    dir: &Path,
    charset: Option<CharsetOverride>,
) -> std::io::Result<ZapScanResult> {
    let mut corpus = Corpus::new();
    let mut version = None;

    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            name.ends_with(".zap") && !name.contains("_freq")
        })
        .collect();
    files.sort_by_key(|e| e.path().to_path_buf());

    for entry in files {
        let bytes = std::fs::read(entry.path())?;
        let text = decode(&bytes, charset);
        parse_zap_file(&text, &mut corpus, &mut version);
    }

    Ok(ZapScanResult { corpus, version })
}

fn parse_zap_file(text: &str, corpus: &mut Corpus, version: &mut Option<ZVersion>) {
    for line in text.lines() {
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix(".NEW") {
            if let Some(d) = rest.trim().chars().next().and_then(|c| c.to_digit(10)) {
                *version = ZVersion::from_digit(d as u8);
            }
            continue;
        }

        let (directive, packed, object_description) = if trimmed.starts_with(".GSTR") {
            (".GSTR", true, false)
        } else if trimmed.starts_with(".STRL") {
            (".STRL", false, true)
        } else if trimmed.starts_with("PRINTI") {
            ("PRINTI", false, false)
        } else if trimmed.starts_with("PRINTR") {
            ("PRINTR", false, false)
        } else {
            continue;
        };

        if let Some(text) = extract_bracketed_string(&trimmed[directive.len()..]) {
            if let Ok(substituted) = substitute_sentinels(&text) {
                corpus.push(StringRecord::new(substituted, packed, object_description, None));
            }
        }
    }
}

/// Capture a `"..."`-delimited string where `""` is an escaped literal
/// quote.
fn extract_bracketed_string(after_directive: &str) -> Option<String> {
    let start = after_directive.find('"')? + 1;
    let body = &after_directive[start..];
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
    None // unterminated string on this line
}
