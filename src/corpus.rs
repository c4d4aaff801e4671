//! String records and the corpus they live in.
//!
//! Each [`StringRecord`] owns its per-pass scratch arrays (`cost`, `choice`)
//! and mutates them in place on every rescore rather than reallocating on
//! each pass.

use crate::zversion::ZVersion;

/// Identifies one candidate pattern by its position in the candidate
/// `Vec<Pattern>`. An index, not a pointer — occurrence lists never
/// outlive a mutation of their key.
pub type PatternId = usize;

/// One source text unit.
#[derive(Debug, Clone)]
pub struct StringRecord {
    /// Immutable text, already sentinel-substituted (space→·, quote→~,
    /// LF→^).
    text: String,
    /// `true` when this string is stored in high memory as a packed
    /// address, subject to stronger padding.
    pub packed: bool,
    /// `true` when this string is an object short description.
    pub object_description: bool,
    /// Groups inline strings into a code routine for padding accounting
    ///; `None` when the adapter did not supply one.
    pub routine_id: Option<u32>,

    /// `cost[i]` = minimum cost (z-chars) to encode `text[i..]`, filled by
    /// the optimal-parse DP right-to-left. `cost[text.chars().count()]`
    /// is always 0.
    cost: Vec<u32>,
    /// `choice[i]` = the pattern chosen at position `i`, or `None` when no
    /// abbreviation is used there (a single literal character is
    /// emitted).
    choice: Vec<Option<PatternId>>,
    /// Last computed minimal cost (`cost[0]` after a rescore).
    pub last_cost: u32,
    /// Rounding waste added to reach a multiple of the padding unit.
    pub rounding: u32,
    /// Total bytes after rounding: `2 * (last_cost + rounding) / 3`.
    pub total_bytes: u32,
}

impl StringRecord {
    pub fn new(text: String, packed: bool, object_description: bool, routine_id: Option<u32>) -> Self {
        let n = text.chars().count();
        StringRecord {
            text,
            packed,
            object_description,
            routine_id,
            cost: vec![0; n + 1],
            choice: vec![None; n + 1],
            last_cost: 0,
            rounding: 0,
            total_bytes: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of logical characters.
    pub fn len_chars(&self) -> usize {
        self.choice.len() - 1
    }

    pub fn cost_scratch(&self) -> &[u32] {
        &self.cost
    }

    pub fn cost_scratch_mut(&mut self) -> &mut [u32] {
        &mut self.cost
    }

    pub fn choice_scratch(&self) -> &[Option<PatternId>] {
        &self.choice
    }

    pub fn choice_scratch_mut(&mut self) -> &mut [Option<PatternId>] {
        &mut self.choice
    }

    /// Rounding unit `R` for this string under `version`:
    /// inline strings always use `R = 3`; packed strings use `R` from
    /// [`ZVersion::packed_rounding_unit`], unless the `-r3` override forces
    /// 3 regardless of version.
    pub fn rounding_unit(&self, version: ZVersion, force_r3: bool) -> u32 {
        if !self.packed || force_r3 {
            3
        } else {
            version.packed_rounding_unit()
        }
    }
}

/// The whole text corpus plus external per-routine code sizes.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub strings: Vec<StringRecord>,
    /// Bytes of code (excluding inline strings) per routine id, supplied
    /// by the adapter that parsed the corpus.
    pub routine_sizes: std::collections::HashMap<u32, u32>,
}

impl Corpus {
    pub fn new() -> Self {
        Corpus::default()
    }

    pub fn push(&mut self, record: StringRecord) {
        self.strings.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Character-frequency histogram over the whole corpus, ignoring the
    /// three sentinels and the ZSCII escape byte 27.
    pub fn char_frequency(&self) -> std::collections::HashMap<char, u64> {
        use crate::alphabet::{LF_SENTINEL, QUOTE_SENTINEL, SPACE_SENTINEL};
        let mut hist = std::collections::HashMap::new();
        for s in &self.strings {
            for c in s.text().chars() {
                if c == SPACE_SENTINEL || c == QUOTE_SENTINEL || c == LF_SENTINEL || c as u32 == 27 {
                    continue;
                }
                *hist.entry(c).or_insert(0u64) += 1;
            }
        }
        hist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_arrays_are_presized() {
        let rec = StringRecord::new("hello".to_owned(), false, false, None);
        assert_eq!(rec.cost_scratch().len(), 6);
        assert_eq!(rec.choice_scratch().len(), 6);
    }

    #[test]
    fn rounding_unit_inline_is_always_three() {
        let rec = StringRecord::new("hi".to_owned(), false, false, None);
        assert_eq!(rec.rounding_unit(ZVersion::V8, false), 3);
    }

    #[test]
    fn rounding_unit_packed_follows_version() {
        let rec = StringRecord::new("hi".to_owned(), true, false, None);
        assert_eq!(rec.rounding_unit(ZVersion::V3, false), 3);
        assert_eq!(rec.rounding_unit(ZVersion::V5, false), 6);
        assert_eq!(rec.rounding_unit(ZVersion::V8, false), 12);
        assert_eq!(rec.rounding_unit(ZVersion::V8, true), 3);
    }

    #[test]
    fn char_frequency_ignores_sentinels() {
        let mut corpus = Corpus::new();
        corpus.push(StringRecord::new("aa·b".to_owned(), false, false, None));
        let hist = corpus.char_frequency();
        assert_eq!(hist.get(&'a'), Some(&2));
        assert_eq!(hist.get(&'b'), Some(&1));
        assert!(!hist.contains_key(&crate::alphabet::SPACE_SENTINEL));
    }
}
