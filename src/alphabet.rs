//! Alphabet & z-char cost model.
//!
//! Classifies each input character into the Z-machine's A0 (lowercase), A1
//! (uppercase), or A2 (punctuation/escape) alphabets and reports the
//! encoding cost of a string in z-characters. The three default tables are
//! the v3 tables used by the reference Z-machine interpreter (compare
//! `ALPHABET_A0`/`ALPHABET_A1`/`ALPHABET_A2_V3` in a Z-machine text decoder);
//! this model never decodes or emits 5-bit z-character streams itself
//! — it only counts cost.

/// One character slot in the A2 table is reserved for the ZSCII escape
/// introducer; it has no printable character and is never a cost-1/2
/// member on its own.
pub const A2_ESCAPE_SLOT: usize = 0;
/// The second A2 slot is the newline shortcut.
pub const A2_NEWLINE_SLOT: usize = 1;

/// Default A0 table (26 lowercase letters).
pub const DEFAULT_A0: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Default A1 table (26 uppercase letters).
pub const DEFAULT_A1: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// Default A2 table (26 slots: escape, newline, then 24 punctuation
/// characters, one of which is the double-quote sentinel `~`).
/// The three in-band sentinels that replace raw bytes on ingestion.
/// `SPACE_SENTINEL` costs 1 (A0 tier); the other two cost 2 (A1/A2 tier).
pub const SPACE_SENTINEL: char = '\u{B7}'; // ·
pub const QUOTE_SENTINEL: char = '~';
pub const LF_SENTINEL: char = '^';

/// Default A2 table: escape slot, the LF sentinel (corpus text never
/// contains a raw `\n`; it is replaced by [`LF_SENTINEL`] on ingestion),
/// then 24 punctuation characters including the quote sentinel.
pub const DEFAULT_A2: [char; 26] = [
    '\0', LF_SENTINEL, '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', ',', '!', '?', '_',
    '#', '\'', QUOTE_SENTINEL, '/', '\\', '-', ':', '(', ')',
];

/// Z-character cost of one encoded character: 1 (A0, or space), 2 (A1, A2,
/// quote, or newline — one shift z-char plus the literal), or 4 (anything
/// else: shift-to-A2, two 10-bit-literal z-chars, shift back).
pub type ZCost = u32;

/// Three alphabets plus the two membership bitsets that make per-character
/// cost lookup O(1). Rebuilt whenever any table changes.
#[derive(Debug, Clone)]
pub struct Alphabet {
    a0: [char; 26],
    a1: [char; 26],
    a2: [char; 26],
    /// Characters costing 1 z-char: A0 members plus the space sentinel.
    cost1: [bool; 256],
    /// Characters costing 2 z-chars: A1/A2 members plus quote/newline
    /// sentinels.
    cost2: [bool; 256],
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(DEFAULT_A0, DEFAULT_A1, DEFAULT_A2)
    }
}

impl Alphabet {
    /// Build an alphabet from three explicit tables, rebuilding the
    /// membership bitsets.
    pub fn new(a0: [char; 26], a1: [char; 26], a2: [char; 26]) -> Self {
        let mut alphabet = Alphabet {
            a0,
            a1,
            a2,
            cost1: [false; 256],
            cost2: [false; 256],
        };
        alphabet.rebuild_masks();
        alphabet
    }

    fn rebuild_masks(&mut self) {
        self.cost1 = [false; 256];
        self.cost2 = [false; 256];
        for &c in &self.a0 {
            mark(&mut self.cost1, c);
        }
        mark(&mut self.cost1, SPACE_SENTINEL);
        for (i, &c) in self.a1.iter().enumerate() {
            let _ = i;
            mark(&mut self.cost2, c);
        }
        for (i, &c) in self.a2.iter().enumerate() {
            if i == A2_ESCAPE_SLOT {
                continue;
            }
            mark(&mut self.cost2, c);
        }
        mark(&mut self.cost2, QUOTE_SENTINEL);
        mark(&mut self.cost2, LF_SENTINEL);
    }

    pub fn a0(&self) -> &[char; 26] {
        &self.a0
    }

    pub fn a1(&self) -> &[char; 26] {
        &self.a1
    }

    pub fn a2(&self) -> &[char; 26] {
        &self.a2
    }

    /// Replace the A0 table and rebuild the cost masks.
    pub fn set_a0(&mut self, a0: [char; 26]) {
        self.a0 = a0;
        self.rebuild_masks();
    }

    /// Replace the A1 table and rebuild the cost masks.
    pub fn set_a1(&mut self, a1: [char; 26]) {
        self.a1 = a1;
        self.rebuild_masks();
    }

    /// Replace the A2 table and rebuild the cost masks.
    pub fn set_a2(&mut self, a2: [char; 26]) {
        self.a2 = a2;
        self.rebuild_masks();
    }

    /// Cost, in z-characters, of encoding a single character.
    #[inline]
    pub fn zchar_cost(&self, c: char) -> ZCost {
        if (c as u32) < 256 && self.cost1[c as usize] {
            1
        } else if (c as u32) < 256 && self.cost2[c as usize] {
            2
        } else {
            4
        }
    }

    /// `ZstringCost(s)` — the plain sum of per-character costs.
    pub fn zstring_cost(&self, s: &str) -> ZCost {
        s.chars().map(|c| self.zchar_cost(c)).sum()
    }
}

/// The three A2 slots that never participate in alphabet substitution:
/// the escape introducer, the newline shortcut, and whichever slot holds
/// [`QUOTE_SENTINEL`] in [`DEFAULT_A2`].
pub fn a2_reserved_slots() -> [usize; 3] {
    [
        A2_ESCAPE_SLOT,
        A2_NEWLINE_SLOT,
        DEFAULT_A2
            .iter()
            .position(|&c| c == QUOTE_SENTINEL)
            .expect("quote sentinel is always present in DEFAULT_A2"),
    ]
}

#[inline]
fn mark(mask: &mut [bool; 256], c: char) {
    let code = c as u32;
    if code < 256 {
        mask[code as usize] = true;
    }
}
