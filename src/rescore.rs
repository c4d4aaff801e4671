//! Optimal-parse rescorer — "the heart".
//!
//! Given a fixed candidate set, computes the minimum-cost abbreviated
//! encoding of every string via Wagner's 1973 dynamic program, then either
//! the total naive savings of the candidate set or the total corpus byte
//! count after padding/rounding, depending on the caller's need. The
//! `cost[]` array is filled right-to-left, one entry per position, same as
//! a backward-match-cost loop.

use crate::alphabet::Alphabet;
use crate::corpus::{Corpus, PatternId};
use crate::pattern::Pattern;
use crate::zversion::ZVersion;

/// Result of one rescore pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescoreReport {
    /// `Σ over S of freq(p)·(cost(p)−2) − 3·⌈(cost(p)+2)/3⌉`, using the
    /// frequencies this pass just recomputed.
    pub naive_savings: i64,
    /// Total corpus bytes after per-string rounding; includes routine
    /// padding only when the caller requested `report_bytes`.
    pub total_bytes: u64,
}

/// Re-run the optimal parse of every string in `corpus` against `candidates`,
/// updating each pattern's `freq` and each string's scratch arrays in place.
///
/// `report_bytes` selects whether routine padding (step 6) is folded into
/// `total_bytes`; the naive-savings figure is always computed since it costs
/// nothing extra once frequencies are known.
pub fn rescore(
    corpus: &mut Corpus,
    candidates: &mut [Pattern],
    alphabet: &Alphabet,
    version: ZVersion,
    force_r3: bool,
    report_bytes: bool,
) -> RescoreReport {
    // Step 1: rebuild any stale occurrence list.
    for p in candidates.iter_mut() {
        if !p.has_occurrences() {
            p.rebuild_occurrences(corpus);
        }
    }

    // Step 2: reset frequencies.
    for p in candidates.iter_mut() {
        p.freq = 0;
    }

    let mut total_bytes: u64 = 0;
    for (string_idx, record) in corpus.strings.iter_mut().enumerate() {
        let chars: Vec<char> = record.text().chars().collect();
        let n = chars.len();

        // Dense reverse index: possible_at[i] lists the ids of candidates
        // with a left-anchored occurrence starting at position i, in
        // candidate-set (insertion) order — this order is load-bearing for
        // the tie-break rule.
        let mut possible_at: Vec<Vec<PatternId>> = vec![Vec::new(); n + 1];
        for (pid, p) in candidates.iter().enumerate() {
            if let Some(occ) = p.occurrences() {
                for &offset in &occ[string_idx] {
                    possible_at[offset as usize].push(pid);
                }
            }
        }

        let cost = record.cost_scratch_mut();
        let choice = record.choice_scratch_mut();
        cost[n] = 0;
        choice[n] = None;

        for i in (0..n).rev() {
            let literal_cost = cost[i + 1] + alphabet.zchar_cost(chars[i]);
            cost[i] = literal_cost;
            choice[i] = None;

            for &pid in &possible_at[i] {
                let p = &candidates[pid];
                let key_len = p.key.chars().count();
                if i + key_len > n {
                    continue;
                }
                let c = 2 + cost[i + key_len];
                let replace = if c < cost[i] {
                    true
                } else if c == cost[i] {
                    let current_cost = match choice[i] {
                        Some(cur) => candidates[cur].cost,
                        None => 0,
                    };
                    p.cost >= current_cost
                } else {
                    false
                };
                if replace {
                    cost[i] = c;
                    choice[i] = Some(pid);
                }
            }
        }

        // Step 4: walk choice left-to-right, counting non-overlapping uses.
        let mut i = 0;
        while i < n {
            match record.choice_scratch()[i] {
                Some(pid) => {
                    candidates[pid].freq += 1;
                    i += candidates[pid].key.chars().count();
                }
                None => i += 1,
            }
        }

        // Step 5: rounding + byte cost.
        let final_cost = record.cost_scratch()[0];
        let r = record.rounding_unit(version, force_r3);
        let rounding = (r - final_cost % r) % r;
        record.last_cost = final_cost;
        record.rounding = rounding;
        record.total_bytes = 2 * (final_cost + rounding) / 3;
        total_bytes += record.total_bytes as u64;
    }

    if report_bytes {
        total_bytes += routine_padding(corpus, version, force_r3);
    }

    let naive_savings: i64 = candidates
        .iter()
        .map(|p| crate::pattern::naive_score(p.freq, p.cost))
        .sum();

    RescoreReport {
        naive_savings,
        total_bytes,
    }
}

/// Step 6: per routine id, sum `routineSize[id]` plus the bytes of every
/// inline string with that routine id, padded up to the next multiple of
/// `2` (z1–3), `4` (z4–7), or `8` (z8).
fn routine_padding(corpus: &Corpus, version: ZVersion, force_r3: bool) -> u64 {
    // Same R-to-byte-unit relationship as string rounding (R/1.5): R=3⇒2,
    // R=6⇒4, R=12⇒8. `-r3` forces the z1–3 unit for routine padding too.
    let r: u64 = if force_r3 { 3 } else { version.packed_rounding_unit() as u64 };
    let unit = r * 2 / 3;

    let mut per_routine: std::collections::HashMap<u32, u64> = corpus
        .routine_sizes
        .iter()
        .map(|(&id, &size)| (id, size as u64))
        .collect();
    for record in &corpus.strings {
        if let Some(id) = record.routine_id {
            *per_routine.entry(id).or_insert(0) += record.total_bytes as u64;
        }
    }

    per_routine
        .values()
        .map(|&bytes| {
            let rem = bytes % unit;
            if rem == 0 {
                bytes
            } else {
                bytes + (unit - rem)
            }
        })
        .sum()
}
