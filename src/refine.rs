//! Rounding-aware refinement.
//!
//! Mutates the selected set to minimize bytes lost to the Z-machine's
//! per-string padding rules: replacement from the residual heap (F1, levels
//! 2–3) and boundary trim/extend (F2, levels ≥1), each run as a multi-pass
//! loop with its own pass budget, early exit, and restore-on-no-improvement.

use crate::alphabet::{Alphabet, SPACE_SENTINEL};
use crate::config::{CUTOFF, NUM_DEEP_PASSES_DEFAULT, NUM_PASSES_DEFAULT};
use crate::corpus::Corpus;
use crate::pattern::Pattern;
use crate::rescore::rescore;
use crate::select::SelectResult;
use crate::zversion::ZVersion;

/// Compression level: controls
/// which refinement stages run and their pass budgets.
#[derive(Debug, Clone, Copy)]
pub enum CompressionLevel {
    /// No refinement.
    Level0,
    /// F2 only.
    Level1,
    /// F1 (normal) + F2.
    Level2 { num_passes: usize },
    /// F1 (maximum) + F2.
    Level3 {
        num_passes: usize,
        num_deep_passes: usize,
    },
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level2 {
            num_passes: NUM_PASSES_DEFAULT,
        }
    }
}

impl CompressionLevel {
    fn runs_f1(&self) -> bool {
        matches!(self, CompressionLevel::Level2 { .. } | CompressionLevel::Level3 { .. })
    }

    fn runs_f2(&self) -> bool {
        !matches!(self, CompressionLevel::Level0)
    }
}

/// Run the refinement stages selected by `level` until the budget is
/// exhausted or neither stage finds an improvement.
pub fn refine(
    corpus: &mut Corpus,
    candidates: &mut Vec<Pattern>,
    best: &mut SelectResult,
    alphabet: &Alphabet,
    version: ZVersion,
    force_r3: bool,
    level: CompressionLevel,
) {
    if level.runs_f1() {
        replacement_from_residue(corpus, candidates, best, alphabet, version, force_r3, level);
    }
    if level.runs_f2() {
        for _ in 0..2 {
            boundary_adjustment(corpus, candidates, &best.best, alphabet, version, force_r3);
        }
    }
}

fn total_bytes(
    corpus: &mut Corpus,
    candidates: &mut [Pattern],
    alphabet: &Alphabet,
    version: ZVersion,
    force_r3: bool,
) -> u64 {
    rescore(corpus, candidates, alphabet, version, force_r3, true).total_bytes
}

/// F1: replacement from residue.
fn replacement_from_residue(
    corpus: &mut Corpus,
    candidates: &mut Vec<Pattern>,
    best: &mut SelectResult,
    alphabet: &Alphabet,
    version: ZVersion,
    force_r3: bool,
    level: CompressionLevel,
) {
    let (num_passes, num_deep_passes, deep) = match level {
        CompressionLevel::Level2 { num_passes } => (num_passes, 0, false),
        CompressionLevel::Level3 {
            num_passes,
            num_deep_passes,
        } => (num_passes, num_deep_passes, true),
        _ => (NUM_PASSES_DEFAULT, NUM_DEEP_PASSES_DEFAULT, false),
    };

    let max_len = best
        .best
        .iter()
        .map(|&pid| candidates[pid].key.chars().count())
        .max()
        .unwrap_or(0)
        .min(CUTOFF)
        + 2;

    let mut passes_used = 0;
    while passes_used < num_passes {
        let q_pid = match best.pop_residual(candidates) {
            Some(pid) => pid,
            None => break,
        };
        passes_used += 1;

        if candidates[q_pid].key.chars().count() > max_len {
            continue;
        }

        let deep_pass = deep && passes_used <= num_deep_passes;
        let bytes_before = total_bytes(corpus, candidates, alphabet, version, force_r3);

        let candidate_positions: Vec<usize> = if deep_pass {
            (0..best.best.len()).collect()
        } else {
            best.best
                .iter()
                .enumerate()
                .filter(|(_, &pid)| contains_or_contained(&candidates[pid].key, &candidates[q_pid].key))
                .map(|(i, _)| i)
                .collect()
        };

        if candidate_positions.is_empty() {
            best.push_residual(q_pid, candidates[q_pid].savings);
            continue;
        }

        let mut best_swap: Option<(usize, u64)> = None;
        for &i in &candidate_positions {
            let displaced = best.best[i];
            best.best[i] = q_pid;
            let bytes_after = total_bytes(corpus, candidates, alphabet, version, force_r3);
            best.best[i] = displaced;

            if bytes_after < bytes_before {
                match best_swap {
                    Some((_, cur_best)) if cur_best <= bytes_after => {}
                    _ => best_swap = Some((i, bytes_after)),
                }
                if !deep_pass {
                    break; // normal level: first improving position wins
                }
            }
        }

        match best_swap {
            Some((i, _)) => {
                let displaced = best.best[i];
                best.best[i] = q_pid;
                best.push_residual(displaced, candidates[displaced].savings);
                total_bytes(corpus, candidates, alphabet, version, force_r3);
            }
            None => {
                best.push_residual(q_pid, candidates[q_pid].savings);
            }
        }
    }
}

fn contains_or_contained(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// F2: boundary adjustment, two outer iterations.
fn boundary_adjustment(
    corpus: &mut Corpus,
    candidates: &mut [Pattern],
    best: &[crate::corpus::PatternId],
    alphabet: &Alphabet,
    version: ZVersion,
    force_r3: bool,
) {
    for &pid in best {
        try_mutation(corpus, candidates, pid, alphabet, version, force_r3, |key| {
            if key.starts_with(SPACE_SENTINEL) {
                Some(key[SPACE_SENTINEL.len_utf8()..].to_owned())
            } else {
                Some(format!("{SPACE_SENTINEL}{key}"))
            }
        });

        try_mutation(corpus, candidates, pid, alphabet, version, force_r3, |key| {
            if key.ends_with(SPACE_SENTINEL) {
                let mut chars: Vec<char> = key.chars().collect();
                chars.pop();
                Some(chars.into_iter().collect())
            } else {
                Some(format!("{key}{SPACE_SENTINEL}"))
            }
        });

        try_mutation(corpus, candidates, pid, alphabet, version, force_r3, |key| {
            drop_prefix_chars(key, 1)
        });

        try_mutation(corpus, candidates, pid, alphabet, version, force_r3, |key| {
            drop_suffix_chars(key, 1)
        });

        try_mutation(corpus, candidates, pid, alphabet, version, force_r3, |key| {
            drop_prefix_chars(key, 2)
        });

        try_mutation(corpus, candidates, pid, alphabet, version, force_r3, |key| {
            drop_suffix_chars(key, 2)
        });
    }
}

fn drop_prefix_chars(key: &str, n: usize) -> Option<String> {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= n || chars.len() - n < 2 {
        return None;
    }
    Some(chars[n..].iter().collect())
}

fn drop_suffix_chars(key: &str, n: usize) -> Option<String> {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= n || chars.len() - n < 2 {
        return None;
    }
    Some(chars[..chars.len() - n].iter().collect())
}

/// Apply `mutate` to `candidates[pid]`'s key, always recomputing cost via
/// `ZstringCost`. Commits if total bytes decreases; otherwise
/// restores the original key/cost.
fn try_mutation(
    corpus: &mut Corpus,
    candidates: &mut [Pattern],
    pid: usize,
    alphabet: &Alphabet,
    version: ZVersion,
    force_r3: bool,
    mutate: impl Fn(&str) -> Option<String>,
) {
    let new_key = match mutate(&candidates[pid].key) {
        Some(k) if k.chars().count() >= 2 => k,
        _ => return,
    };

    let bytes_before = total_bytes(corpus, candidates, alphabet, version, force_r3);

    let old_key = candidates[pid].key.clone();
    let old_cost = candidates[pid].cost;
    candidates[pid].key = new_key;
    candidates[pid].cost = alphabet.zstring_cost(&candidates[pid].key);
    candidates[pid].invalidate_occurrences();

    let bytes_after = total_bytes(corpus, candidates, alphabet, version, force_r3);

    if bytes_after < bytes_before {
        // Committed: occurrences were already rebuilt by the rescore above.
    } else {
        candidates[pid].key = old_key;
        candidates[pid].cost = old_cost;
        candidates[pid].invalidate_occurrences();
        total_bytes(corpus, candidates, alphabet, version, force_r3);
    }
}
