//! State machine tying the selection core together.
//!
//! `Init → Enumerated → NaiveRanked → Selected → Refined → Emitted`, with
//! `--onlyrefactor` short-circuiting from `Enumerated` straight to the
//! long-duplicate report.

use crate::alphabet::Alphabet;
use crate::corpus::Corpus;
use crate::custom_alphabet::build_custom_alphabet;
use crate::pattern::{extract_patterns, Pattern};
use crate::refine::{refine, CompressionLevel};
use crate::select::{select_abbreviations, SelectOptions};
use crate::suffix_array::{concat_with_separator, SuffixArray};
use crate::zversion::ZVersion;

/// Abort-worthy input errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    EmptyCorpus,
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::EmptyCorpus => write!(f, "no data to index"),
        }
    }
}

impl std::error::Error for DriverError {}

/// Everything the driver needs that isn't carried by `Corpus` itself.
#[derive(Debug, Clone)]
pub struct DriverOptions {
    pub n: usize,
    pub version: ZVersion,
    pub force_r3: bool,
    pub throw_back: bool,
    pub level: CompressionLevel,
    pub auto_alphabet: bool,
    /// User-supplied `-a0`/`-a1`/`-a2` tables, already merged onto the
    /// defaults. Takes precedence over `auto_alphabet` when present.
    pub explicit_alphabet: Option<Alphabet>,
    pub only_refactor: bool,
}

/// Final output of a completed (non-`--onlyrefactor`) run: the selected
/// patterns in table order, plus whichever custom-alphabet warning applies.
pub struct SelectionOutcome {
    pub selected: Vec<Pattern>,
    pub custom_alphabet: Option<Alphabet>,
    pub unsupported_alphabet_warning: bool,
    /// Total z-char cost saved across the corpus by the resolved alphabet
    /// versus the default tables, when `auto_alphabet` built one.
    pub custom_alphabet_savings: Option<i64>,
}

/// `--onlyrefactor` output: the long-duplicate report, longest first.
pub struct RefactorOutcome {
    pub long_patterns: Vec<Pattern>,
}

pub enum DriverResult {
    Selection(SelectionOutcome),
    Refactor(RefactorOutcome),
}

/// Run the whole selection pipeline over an
/// already-ingested corpus.
pub fn run(mut corpus: Corpus, opts: &DriverOptions) -> Result<DriverResult, DriverError> {
    // Init → Enumerated.
    let texts: Vec<&str> = corpus.strings.iter().map(|s| s.text()).collect();
    let (symbols, offsets) = concat_with_separator(&texts);
    let sa = SuffixArray::build(&symbols).map_err(|_| DriverError::EmptyCorpus)?;

    let default_alphabet = Alphabet::default();

    // Resolve which alphabet governs both extraction and selection: an
    // explicit `-a0`/`-a1`/`-a2` table takes precedence over an auto-built
    // one, which in turn takes precedence over the defaults.
    let (alphabet, unsupported_alphabet_warning, custom_alphabet) =
        if let Some(explicit) = opts.explicit_alphabet.clone() {
            (explicit, false, None)
        } else if opts.auto_alphabet {
            let histogram = corpus.char_frequency();
            let result = build_custom_alphabet(&histogram, opts.version);
            let warning = result.unsupported_version_warning;
            (result.alphabet.clone(), warning, Some(result.alphabet))
        } else {
            (default_alphabet.clone(), false, None)
        };

    let extraction = extract_patterns(&corpus, &symbols, &offsets, &sa, &alphabet);

    if opts.only_refactor {
        return Ok(DriverResult::Refactor(RefactorOutcome {
            long_patterns: extraction.long_patterns,
        }));
    }

    // Custom-alphabet cost delta: the total z-char savings the resolved
    // alphabet buys over the default tables, summed across the corpus.
    let custom_alphabet_savings = custom_alphabet.as_ref().map(|_| {
        corpus
            .strings
            .iter()
            .map(|s| default_alphabet.zstring_cost(s.text()) as i64 - alphabet.zstring_cost(s.text()) as i64)
            .sum()
    });

    // NaiveRanked: candidates as extracted, keyed in insertion order (the
    // HashMap's arbitrary order is re-stabilized here since the DP's
    // tie-break depends on candidate-set insertion order.
    let mut candidates: Vec<Pattern> = extraction.candidates.into_values().collect();
    candidates.sort_by(|a, b| a.key.cmp(&b.key));

    // Selected.
    let select_opts = SelectOptions {
        n: opts.n,
        version: opts.version,
        force_r3: opts.force_r3,
        throw_back: opts.throw_back,
    };
    let mut result = select_abbreviations(&mut corpus, &mut candidates, &alphabet, select_opts);

    // Refined.
    refine(
        &mut corpus,
        &mut candidates,
        &mut result,
        &alphabet,
        opts.version,
        opts.force_r3,
        opts.level,
    );

    // Emitted: the caller (adapters) renders `selected` in whatever output
    // dialect was requested.
    let selected: Vec<Pattern> = result.best.into_iter().map(|pid| candidates[pid].clone()).collect();

    Ok(DriverResult::Selection(SelectionOutcome {
        selected,
        custom_alphabet,
        unsupported_alphabet_warning,
        custom_alphabet_savings,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::StringRecord;

    #[test]
    fn empty_corpus_is_an_error() {
        let corpus = Corpus::new();
        let opts = DriverOptions {
            n: 96,
            version: ZVersion::V3,
            force_r3: false,
            throw_back: false,
            level: CompressionLevel::default(),
            auto_alphabet: false,
            explicit_alphabet: None,
            only_refactor: false,
        };
        assert_eq!(run(corpus, &opts).unwrap_err(), DriverError::EmptyCorpus);
    }

    #[test]
    fn onlyrefactor_short_circuits_to_long_duplicate_report() {
        let mut corpus = Corpus::new();
        let long = "q".repeat(crate::config::CUTOFF + 5);
        corpus.push(StringRecord::new(long.clone(), false, false, None));
        corpus.push(StringRecord::new(long, false, false, None));
        let opts = DriverOptions {
            n: 96,
            version: ZVersion::V3,
            force_r3: false,
            throw_back: false,
            level: CompressionLevel::default(),
            auto_alphabet: false,
            explicit_alphabet: None,
            only_refactor: true,
        };
        match run(corpus, &opts).unwrap() {
            DriverResult::Refactor(outcome) => assert!(!outcome.long_patterns.is_empty()),
            DriverResult::Selection(_) => panic!("expected Refactor outcome"),
        }
    }

    #[test]
    fn selection_respects_n_budget() {
        let mut corpus = Corpus::new();
        corpus.push(StringRecord::new(
            "ababababcdcdcdcdefefefefghghghgh".to_owned(),
            false,
            false,
            None,
        ));
        let opts = DriverOptions {
            n: 2,
            version: ZVersion::V3,
            force_r3: false,
            throw_back: false,
            level: CompressionLevel::default(),
            auto_alphabet: false,
            explicit_alphabet: None,
            only_refactor: false,
        };
        match run(corpus, &opts).unwrap() {
            DriverResult::Selection(outcome) => assert!(outcome.selected.len() <= 2),
            DriverResult::Refactor(_) => panic!("expected Selection outcome"),
        }
    }

    #[test]
    fn auto_alphabet_reports_nonnegative_cost_delta() {
        let mut corpus = Corpus::new();
        let mut hist_text = String::new();
        for _ in 0..50 {
            hist_text.push('q');
        }
        corpus.push(StringRecord::new(format!("{hist_text} and some more text"), false, false, None));
        let opts = DriverOptions {
            n: 96,
            version: ZVersion::V5,
            force_r3: false,
            throw_back: false,
            level: CompressionLevel::default(),
            auto_alphabet: true,
            explicit_alphabet: None,
            only_refactor: false,
        };
        match run(corpus, &opts).unwrap() {
            DriverResult::Selection(outcome) => {
                assert!(outcome.custom_alphabet.is_some());
                let savings = outcome.custom_alphabet_savings.expect("savings reported when auto_alphabet is set");
                assert!(savings >= 0);
            }
            DriverResult::Refactor(_) => panic!("expected Selection outcome"),
        }
    }

    #[test]
    fn explicit_alphabet_takes_precedence_over_auto_alphabet() {
        let mut corpus = Corpus::new();
        corpus.push(StringRecord::new("zzzzzzzzzz and more text here".to_owned(), false, false, None));
        let mut explicit = Alphabet::default();
        let mut a0 = crate::alphabet::DEFAULT_A0;
        a0[0] = 'z';
        a0[25] = 'a';
        explicit.set_a0(a0);
        let opts = DriverOptions {
            n: 96,
            version: ZVersion::V5,
            force_r3: false,
            throw_back: false,
            level: CompressionLevel::default(),
            auto_alphabet: true,
            explicit_alphabet: Some(explicit),
            only_refactor: false,
        };
        match run(corpus, &opts).unwrap() {
            DriverResult::Selection(outcome) => {
                assert!(outcome.custom_alphabet.is_none());
                assert!(outcome.custom_alphabet_savings.is_none());
            }
            DriverResult::Refactor(_) => panic!("expected Selection outcome"),
        }
    }
}
