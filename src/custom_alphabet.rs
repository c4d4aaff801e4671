//! Custom-alphabet builder, z5+ only.
//!
//! Builds a per-game `A0`/`A1`/`A2` from the corpus's character-frequency
//! histogram: the 75 most frequent characters become the alphabet pool, the
//! top 26 go to A0, and the remaining 49 are split 26/23 into A1/A2 by
//! first occupying the default tables' existing slots, then filling
//! whatever is left in frequency order.

use std::collections::HashMap;

use crate::alphabet::{Alphabet, DEFAULT_A0, DEFAULT_A1, DEFAULT_A2};
use crate::zversion::ZVersion;

/// Result of building a custom alphabet: the alphabet itself plus the
/// reported cost delta against the default tables.
pub struct CustomAlphabetResult {
    pub alphabet: Alphabet,
    /// `true` when the target z-version doesn't honor a custom alphabet.
    pub unsupported_version_warning: bool,
}

const POOL_SIZE: usize = 75;

/// Build a custom alphabet from `histogram`.
pub fn build_custom_alphabet(histogram: &HashMap<char, u64>, version: ZVersion) -> CustomAlphabetResult {
    let mut by_freq: Vec<(char, u64)> = histogram.iter().map(|(&c, &f)| (c, f)).collect();
    by_freq.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    by_freq.truncate(POOL_SIZE);

    let pool: Vec<char> = by_freq.into_iter().map(|(c, _)| c).collect();
    let a0_pool: Vec<char> = pool.iter().take(26).copied().collect();
    let remaining: Vec<char> = pool.iter().skip(26).copied().collect();

    let a0 = fill_slots(&a0_pool, &DEFAULT_A0).try_into().unwrap();

    let a1_pool: Vec<char> = remaining.iter().take(26).copied().collect();
    let a2_pool: Vec<char> = remaining.iter().skip(26).take(23).copied().collect();
    let a1 = fill_slots(&a1_pool, &DEFAULT_A1).try_into().unwrap();

    // A2's three reserved slots (escape, newline, quote) are never
    // replaced; only the 23 punctuation slots are eligible.
    let reserved = crate::alphabet::a2_reserved_slots();
    let eligible_default: Vec<char> = DEFAULT_A2
        .iter()
        .enumerate()
        .filter(|(i, _)| !reserved.contains(i))
        .map(|(_, &c)| c)
        .collect();
    let filled_eligible = fill_slots(&a2_pool, &eligible_default);
    let mut filled_iter = filled_eligible.into_iter();
    let mut a2 = DEFAULT_A2;
    for (slot, c) in a2.iter_mut().enumerate() {
        if !reserved.contains(&slot) {
            *c = filled_iter.next().expect("eligible/filled slot counts match");
        }
    }

    CustomAlphabetResult {
        alphabet: Alphabet::new(a0, a1, a2),
        unsupported_version_warning: !version.supports_custom_alphabet(),
    }
}

/// Lay `chosen` characters into a table the same length as `default`,
/// preferring to occupy the positions `default` already holds them at, then
/// filling any remaining empty slots in order with whatever is left over.
fn fill_slots(chosen: &[char], default: &[char]) -> Vec<char> {
    let mut table = vec!['\0'; default.len()];
    let mut placed = vec![false; chosen.len()];

    for (slot, &def_c) in default.iter().enumerate() {
        if let Some(idx) = chosen.iter().position(|&c| c == def_c) {
            if !placed[idx] {
                table[slot] = chosen[idx];
                placed[idx] = true;
            }
        }
    }

    let mut leftover = chosen.iter().zip(placed.iter()).filter(|(_, &p)| !p).map(|(&c, _)| c);
    for slot in table.iter_mut() {
        if *slot == '\0' {
            if let Some(c) = leftover.next() {
                *slot = c;
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario S5: frequent `q`/`z`/`j` migrate into A0 and
    /// every affected string's cost drops by 1 per occurrence.
    #[test]
    fn scenario_s5_frequent_consonants_migrate_to_a0() {
        let mut hist = HashMap::new();
        // Make 'q' overwhelmingly frequent so it displaces a rarer default
        // A0 member out of the top-26 pool.
        hist.insert('q', 1000);
        for (i, c) in ('a'..='z').enumerate().skip(1) {
            hist.insert(c, 100 - i as u64);
        }
        let result = build_custom_alphabet(&hist, ZVersion::V5);
        assert!(result.alphabet.a0().contains(&'q'));

        let default = Alphabet::default();
        let text = "qqqq";
        assert!(result.alphabet.zstring_cost(text) <= default.zstring_cost(text));
    }

    #[test]
    fn warns_below_z5() {
        let hist = HashMap::new();
        let result = build_custom_alphabet(&hist, ZVersion::V4);
        assert!(result.unsupported_version_warning);
        let result = build_custom_alphabet(&hist, ZVersion::V5);
        assert!(!result.unsupported_version_warning);
    }

    #[test]
    fn empty_histogram_falls_back_to_defaults_shape() {
        let hist = HashMap::new();
        let result = build_custom_alphabet(&hist, ZVersion::V5);
        assert_eq!(result.alphabet.a0().len(), 26);
    }
}
