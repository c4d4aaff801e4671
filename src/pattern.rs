//! Pattern extraction.
//!
//! Enumerates every repeated substring (length ≥ 2) of the corpus using the
//! LCP array, scores it via the naive-savings predicate, and admits
//! positive-scoring candidates to a hash-keyed dictionary. Patterns longer
//! than [`crate::config::CUTOFF`] characters are routed to a separate
//! long-pattern heap instead, from which nested duplicates are suppressed
//! to produce the `--onlyrefactor` hint list.

use std::collections::HashMap;

use crate::alphabet::Alphabet;
use crate::config::{CUTOFF, RESERVED_AT, SEPARATOR};
use crate::corpus::Corpus;
use crate::suffix_array::SuffixArray;

/// One candidate abbreviation.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// Key string (≥2 chars, never contains the separator or `@`).
    pub key: String,
    /// `cost(p)` in z-characters.
    pub cost: u32,
    /// Observed frequency: naive occurrence count at extraction time;
    /// overwritten by [`crate::rescore::rescore`] with the actual
    /// non-overlapping usage count on every rescore.
    pub freq: u64,
    /// Current savings score. Set to the naive score at extraction; the
    /// heap-driven selector overwrites it with the
    /// rescored delta on reinsertion.
    pub savings: i64,
    /// Left-anchored occurrence offsets, one list per string, indexed by
    /// string id. `None` means stale or not yet computed: any mutation of `key` must invalidate this.
    occurrences: Option<Vec<Vec<u32>>>,
}

impl Pattern {
    pub fn new(key: String, cost: u32, freq: u64) -> Self {
        let savings = naive_score(freq, cost);
        Pattern {
            key,
            cost,
            freq,
            savings,
            occurrences: None,
        }
    }

    /// `naive_score(p)` — savings of replacing
    /// every occurrence by a 2-z-char reference, minus the once-rounded
    /// storage of the abbreviation itself.
    pub fn naive_score(&self) -> i64 {
        naive_score(self.freq, self.cost)
    }

    pub fn occurrences(&self) -> Option<&[Vec<u32>]> {
        self.occurrences.as_deref()
    }

    pub fn has_occurrences(&self) -> bool {
        self.occurrences.is_some()
    }

    /// Invalidate the occurrence lists.
    pub fn invalidate_occurrences(&mut self) {
        self.occurrences = None;
    }

    /// Recompute left-anchored occurrence offsets for every string in
    /// `corpus` by scanning for `self.key`.
    pub fn rebuild_occurrences(&mut self, corpus: &Corpus) {
        let key_chars: Vec<char> = self.key.chars().collect();
        let mut per_string = Vec::with_capacity(corpus.len());
        for record in &corpus.strings {
            per_string.push(find_left_anchored(record.text(), &key_chars));
        }
        self.occurrences = Some(per_string);
    }
}

fn find_left_anchored(text: &str, key: &[char]) -> Vec<u32> {
    let chars: Vec<char> = text.chars().collect();
    let mut offsets = Vec::new();
    if key.is_empty() || chars.len() < key.len() {
        return offsets;
    }
    for i in 0..=(chars.len() - key.len()) {
        if chars[i..i + key.len()] == *key {
            offsets.push(i as u32);
        }
    }
    offsets
}

/// `ceil(a / b)` for non-negative integers.
fn ceil_div(a: i64, b: i64) -> i64 {
    (a + b - 1) / b
}

/// `naive_score(p) = freq(p)*(cost(p)-2) - 3*ceil((cost(p)+2)/3)`.
pub fn naive_score(freq: u64, cost: u32) -> i64 {
    let freq = freq as i64;
    let cost = cost as i64;
    freq * (cost - 2) - 3 * ceil_div(cost + 2, 3)
}

/// Everything produced by a single extraction pass.
pub struct ExtractionResult {
    /// Patterns with positive naive score, keyed by their text so
    /// duplicate candidates from overlapping LCP ranges collapse.
    pub candidates: HashMap<String, Pattern>,
    /// Long patterns (key length > [`CUTOFF`]) surviving head/tail
    /// duplicate suppression, longest first — the `--onlyrefactor`
    /// report source.
    pub long_patterns: Vec<Pattern>,
}

/// Enumerate every repeated substring of `corpus` via `sa`'s LCP array,
/// admitting positive-naive-score candidates and collecting the
/// long-pattern heap.
pub fn extract_patterns(
    corpus: &Corpus,
    symbols: &[u32],
    offsets: &[usize],
    sa: &SuffixArray,
    alphabet: &Alphabet,
) -> ExtractionResult {
    let lcp = sa.lcp();
    let gsa = symbols;
    let mut candidates: HashMap<String, Pattern> = HashMap::new();
    let mut long_raw: HashMap<String, Pattern> = HashMap::new();

    let n = sa.len();
    for i in 0..n {
        let start_symbol = gsa[sa.sa()[i] as usize];
        if start_symbol == SEPARATOR as u32 {
            continue;
        }
        let next_lcp = if i + 1 < lcp.len() { lcp[i + 1] as usize } else { 0 };
        let start = std::cmp::max(1, lcp[i] as usize);
        if start > next_lcp {
            continue;
        }
        let base = sa.sa()[i] as usize;
        for j in start..=next_lcp {
            if base + j > gsa.len() {
                break;
            }
            let slice = &gsa[base..base + j];
            if slice.contains(&(SEPARATOR as u32)) || slice.contains(&(RESERVED_AT as u32)) {
                continue;
            }
            let key: String = slice.iter().filter_map(|&c| char::from_u32(c)).collect();
            if key.chars().count() != j {
                continue; // a symbol failed to round-trip to a char; skip
            }
            let cost = alphabet.zstring_cost(&key);
            let freq = sa.range_count(i, j) as u64;

            if j > CUTOFF {
                long_raw.entry(key.clone()).or_insert_with(|| Pattern::new(key, cost, freq));
                continue;
            }

            let score = naive_score(freq, cost);
            if score > 0 {
                candidates
                    .entry(key.clone())
                    .and_modify(|p| {
                        if freq > p.freq {
                            p.freq = freq;
                            p.savings = naive_score(p.freq, p.cost);
                        }
                    })
                    .or_insert_with(|| Pattern::new(key, cost, freq));
            }
        }
    }

    let _ = offsets; // retained in the signature for callers that need string boundaries
    let long_patterns = suppress_nested_long_patterns(long_raw);

    ExtractionResult {
        candidates,
        long_patterns,
    }
}

/// From the long-pattern heap, keep only keys whose head (`key[1..]`) and
/// tail (`key[..-1]`) have not already been accepted — this suppresses
/// nested long duplicates.
fn suppress_nested_long_patterns(raw: HashMap<String, Pattern>) -> Vec<Pattern> {
    let mut by_len: Vec<Pattern> = raw.into_values().collect();
    by_len.sort_by(|a, b| b.key.chars().count().cmp(&a.key.chars().count()));

    let mut accepted_keys: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut result = Vec::new();
    for p in by_len {
        let chars: Vec<char> = p.key.chars().collect();
        let head: String = chars[1..].iter().collect();
        let tail: String = chars[..chars.len() - 1].iter().collect();
        if accepted_keys.contains(&head) || accepted_keys.contains(&tail) {
            continue;
        }
        accepted_keys.insert(p.key.clone());
        result.push(p);
    }
    result
}
