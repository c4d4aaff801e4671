//! Generalized suffix array + LCP array builder.
//!
//! Builds the suffix array of the generalized corpus — all input strings
//! concatenated with [`crate::config::SEPARATOR`] between them — using the
//! Manber–Myers doubling construction, then derives the LCP array with
//! Kasai's algorithm. The corpus is indexed over logical characters (one
//! code point each) rather than raw encoded bytes, generalized to a symbol
//! stream of `u32` code points — a superset of Latin-1 that also covers
//! UTF-8-sourced corpora without truncation; see DESIGN.md.
//!
//! Also exposes [`SuffixArray::range_count`], the range-count primitive
//! extraction needs to turn an LCP range into an occurrence frequency.

use crate::config::SEPARATOR;

/// Suffix array and LCP array over one generalized symbol corpus.
#[derive(Debug, Clone)]
pub struct SuffixArray {
    /// `sa[i]` is the starting symbol offset of the suffix ranked `i`-th.
    sa: Vec<u32>,
    /// `lcp[i]` is the length of the longest common prefix between the
    /// suffixes at `sa[i-1]` and `sa[i]`; `lcp[0]` is always 0.
    lcp: Vec<u32>,
    len: usize,
}

/// Empty corpus cannot be indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyCorpusError;

impl std::fmt::Display for EmptyCorpusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no data to index")
    }
}

impl std::error::Error for EmptyCorpusError {}

impl SuffixArray {
    /// Build the generalized suffix array + LCP array for `symbols`.
    ///
    /// Returns [`EmptyCorpusError`] ("no data to index") for an empty
    /// corpus, aborting selection.
    pub fn build(symbols: &[u32]) -> Result<Self, EmptyCorpusError> {
        if symbols.is_empty() {
            return Err(EmptyCorpusError);
        }
        let sa = build_suffix_array(symbols);
        let lcp = kasai_lcp(symbols, &sa);
        Ok(SuffixArray {
            sa,
            lcp,
            len: symbols.len(),
        })
    }

    /// The suffix array itself: `sa()[i]` is the symbol offset of the
    /// suffix ranked `i`-th lexicographically.
    pub fn sa(&self) -> &[u32] {
        &self.sa
    }

    /// The LCP array: `lcp()[i]` is the common-prefix length between the
    /// suffixes at adjacent ranks `i-1` and `i`. `lcp()[0] == 0`.
    pub fn lcp(&self) -> &[u32] {
        &self.lcp
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Range-count primitive: given a suffix-array index
    /// `i` and a prefix length `ell`, return the size of the maximal
    /// contiguous index range `[lo, hi]` around `i` such that every LCP
    /// value between adjacent entries in the range is `>= ell`. This is
    /// the frequency of the length-`ell` prefix of the suffix at `sa[i]`
    /// (occurrences counted with overlaps).
    pub fn range_count(&self, i: usize, ell: usize) -> usize {
        if self.sa.is_empty() {
            return 0;
        }
        let mut lo = i;
        while lo > 0 && (self.lcp[lo] as usize) >= ell {
            lo -= 1;
        }
        let mut hi = i;
        while hi + 1 < self.lcp.len() && (self.lcp[hi + 1] as usize) >= ell {
            hi += 1;
        }
        hi - lo + 1
    }
}

/// Manber–Myers doubling construction: rank suffixes by `(rank[i],
/// rank[i + k/2])`, doubling `k` until every suffix has a unique rank or
/// `k >= 2n`.
fn build_suffix_array(symbols: &[u32]) -> Vec<u32> {
    let n = symbols.len();
    let mut sa: Vec<u32> = (0..n as u32).collect();
    let mut rank: Vec<i64> = symbols.iter().map(|&b| b as i64).collect();
    let mut tmp: Vec<i64> = vec![0; n];

    let mut k: usize = 1;
    while k < 2 * n {
        let rank_at = |i: usize| -> i64 {
            if i < n {
                rank[i]
            } else {
                -1
            }
        };
        sa.sort_unstable_by(|&a, &b| {
            let a = a as usize;
            let b = b as usize;
            (rank[a], rank_at(a + k)).cmp(&(rank[b], rank_at(b + k)))
        });

        tmp[sa[0] as usize] = 0;
        for i in 1..n {
            let prev = sa[i - 1] as usize;
            let cur = sa[i] as usize;
            let same = rank[prev] == rank[cur] && rank_at(prev + k) == rank_at(cur + k);
            tmp[cur] = tmp[prev] + if same { 0 } else { 1 };
        }
        rank.copy_from_slice(&tmp);

        if rank[sa[n - 1] as usize] as usize == n - 1 {
            break;
        }
        k *= 2;
    }

    sa
}

/// Kasai's O(n) LCP construction from a suffix array.
fn kasai_lcp(symbols: &[u32], sa: &[u32]) -> Vec<u32> {
    let n = symbols.len();
    let mut rank = vec![0u32; n];
    for (i, &s) in sa.iter().enumerate() {
        rank[s as usize] = i as u32;
    }

    let mut lcp = vec![0u32; n];
    let mut h: u32 = 0;
    for i in 0..n {
        if rank[i] > 0 {
            let j = sa[(rank[i] - 1) as usize] as usize;
            while i + h as usize < n
                && j + h as usize < n
                && symbols[i + h as usize] == symbols[j + h as usize]
            {
                h += 1;
            }
            lcp[rank[i] as usize] = h;
            if h > 0 {
                h -= 1;
            }
        } else {
            h = 0;
        }
    }
    lcp
}

/// Join `strings` with [`SEPARATOR`] between (and after) each entry,
/// producing the generalized symbol corpus suffix-array construction
/// operates over. Returns the joined symbols plus, for each input string,
/// the symbol offset at which it starts in the joined corpus.
pub fn concat_with_separator<S: AsRef<str>>(strings: &[S]) -> (Vec<u32>, Vec<usize>) {
    let mut symbols = Vec::new();
    let mut offsets = Vec::with_capacity(strings.len());
    for s in strings {
        offsets.push(symbols.len());
        symbols.extend(s.as_ref().chars().map(|c| c as u32));
        symbols.push(SEPARATOR as u32);
    }
    (symbols, offsets)
}
