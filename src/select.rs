//! Heap-driven greedy selector with reinsertion.
//!
//! Pops the current best-scoring candidate, provisionally accepts it, and
//! rescores the whole working set; if the marginal gain is worse than what
//! remains on the heap, the pick is reinserted with its refreshed score
//! instead of being kept. Uses `std::collections::BinaryHeap` with
//! stale-entry filtering on pop; no external crate (a min-max-heap
//! dependency was considered and rejected — see DESIGN.md).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::alphabet::Alphabet;
use crate::config::{N_DEFAULT, THROW_BACK_OVERSAMPLE};
use crate::corpus::{Corpus, PatternId};
use crate::pattern::Pattern;
use crate::rescore::rescore;
use crate::zversion::ZVersion;

/// One heap entry: a pattern id plus the score it was pushed with. Stale
/// once `pattern.savings` has since changed — checked on pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeapEntry {
    score: i64,
    pid: PatternId,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score).then(self.pid.cmp(&other.pid))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Configuration for one selection run.
#[derive(Debug, Clone, Copy)]
pub struct SelectOptions {
    pub n: usize,
    pub version: ZVersion,
    pub force_r3: bool,
    pub throw_back: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        SelectOptions {
            n: N_DEFAULT,
            version: ZVersion::V3,
            force_r3: false,
            throw_back: false,
        }
    }
}

/// Outcome of selection: the chosen ids (length ≤ `n`) and the residual heap
/// state needed by the refiner to pop further candidates.
pub struct SelectResult {
    pub best: Vec<PatternId>,
    residual: BinaryHeap<HeapEntry>,
}

impl SelectResult {
    /// Pop the next-highest-scoring residual pattern, skipping stale
    /// entries whose stored score no longer matches the pattern's current
    /// `savings`.
    pub fn pop_residual(&mut self, candidates: &[Pattern]) -> Option<PatternId> {
        while let Some(entry) = self.residual.pop() {
            if entry.score == candidates[entry.pid].savings {
                return Some(entry.pid);
            }
        }
        None
    }

    pub fn push_residual(&mut self, pid: PatternId, score: i64) {
        self.residual.push(HeapEntry { score, pid });
    }

    pub fn is_residual_empty(&self) -> bool {
        self.residual.is_empty()
    }
}

/// Greedy top-`N` selection with recomputed-savings reinsertion.
pub fn select_abbreviations(
    corpus: &mut Corpus,
    candidates: &mut [Pattern],
    alphabet: &Alphabet,
    opts: SelectOptions,
) -> SelectResult {
    let oversample = if opts.throw_back { THROW_BACK_OVERSAMPLE } else { 0 };
    let target = opts.n + oversample;

    let mut heap: BinaryHeap<HeapEntry> = candidates
        .iter()
        .enumerate()
        .map(|(pid, p)| HeapEntry { score: p.savings, pid })
        .collect();

    let mut best: Vec<PatternId> = Vec::with_capacity(target);
    let mut prev_savings: i64 = 0;

    while best.len() < target {
        let entry = match heap.pop() {
            Some(e) => e,
            None => break,
        };
        // Stale-entry filtering: skip if this pattern's score has moved on
        // since it was pushed.
        if entry.score != candidates[entry.pid].savings {
            continue;
        }

        best.push(entry.pid);
        let report = rescore(corpus, candidates, alphabet, opts.version, opts.force_r3, false);
        let current_savings = report.naive_savings;
        let delta = current_savings - prev_savings;

        let peek_score = heap.peek().map(|e| e.score);
        let worse_than_remaining = match peek_score {
            Some(top) => delta < top,
            None => false,
        };

        if worse_than_remaining {
            best.pop();
            candidates[entry.pid].savings = delta;
            heap.push(HeapEntry {
                score: delta,
                pid: entry.pid,
            });
        } else {
            prev_savings = current_savings;
            if opts.throw_back {
                let mut removed_any = false;
                let mut kept = Vec::with_capacity(best.len());
                for pid in best.drain(..) {
                    if candidates[pid].savings < delta {
                        heap.push(HeapEntry {
                            score: candidates[pid].savings,
                            pid,
                        });
                        removed_any = true;
                    } else {
                        kept.push(pid);
                    }
                }
                best = kept;
                if removed_any {
                    let report =
                        rescore(corpus, candidates, alphabet, opts.version, opts.force_r3, false);
                    prev_savings = report.naive_savings;
                }
            }
        }
    }

    // Trim back to N, moving the excess to the residual heap.
    if best.len() > opts.n {
        let excess: Vec<PatternId> = best.split_off(opts.n);
        for pid in excess {
            heap.push(HeapEntry {
                score: candidates[pid].savings,
                pid,
            });
        }
        // Re-establish prev_savings for the trimmed set so the refiner's
        // first rescore reflects reality rather than the oversampled total.
        rescore(corpus, candidates, alphabet, opts.version, opts.force_r3, false);
    }

    SelectResult {
        best,
        residual: heap,
    }
}
