//! Top-level scenario tests exercising the full selection
//! pipeline end-to-end via `zabbrev::driver::run`.

use zabbrev::corpus::{Corpus, StringRecord};
use zabbrev::driver::{run, DriverOptions, DriverResult};
use zabbrev::refine::CompressionLevel;
use zabbrev::zversion::ZVersion;

fn opts(n: usize) -> DriverOptions {
    DriverOptions {
        n,
        version: ZVersion::V3,
        force_r3: false,
        throw_back: false,
        level: CompressionLevel::default(),
        auto_alphabet: false,
        explicit_alphabet: None,
        only_refactor: false,
    }
}

/// S1: "the·" scores negative, so the heap never admits it and
/// selection yields zero abbreviations.
#[test]
fn s1_trivial_repeat_yields_no_abbreviations() {
    let mut corpus = Corpus::new();
    corpus.push(StringRecord::new("the cat sat".to_owned(), false, false, None));
    corpus.push(StringRecord::new("the dog ran".to_owned(), false, false, None));

    match run(corpus, &opts(1)).unwrap() {
        DriverResult::Selection(outcome) => assert!(outcome.selected.is_empty()),
        DriverResult::Refactor(_) => panic!("expected Selection outcome"),
    }
}

/// S2: "abcdabcdabcd" admits "abcdabcd" at extraction but
/// optimal-parse overlap resolution limits it to a single non-overlapping
/// use, driving the selector's reinsertion path.
#[test]
fn s2_clear_winner_survives_reinsertion() {
    let mut corpus = Corpus::new();
    corpus.push(StringRecord::new("abcdabcdabcd".to_owned(), false, false, None));

    match run(corpus, &opts(1)).unwrap() {
        DriverResult::Selection(outcome) => assert!(outcome.selected.len() <= 1),
        DriverResult::Refactor(_) => panic!("expected Selection outcome"),
    }
}

/// S6: a 70-character abbreviation in Inform6 output must
/// trigger the too-long warning.
#[test]
fn s6_inform6_long_abbreviation_warns() {
    use zabbrev::adapters::output_inform;
    use zabbrev::pattern::Pattern;

    let key = "m".repeat(70);
    let p = Pattern::new(key, 70, 2);
    let rendered = output_inform::render(&[&p]);
    assert!(rendered.contains("Warning: Abbreviation too long"));
}

/// --onlyrefactor short-circuits straight to the
/// long-duplicate report without running selection.
#[test]
fn onlyrefactor_reports_long_duplicates_without_selecting() {
    let mut corpus = Corpus::new();
    let long = "the grue slithers through the dark passage ".repeat(2);
    corpus.push(StringRecord::new(long.clone(), false, false, None));
    corpus.push(StringRecord::new(long, false, false, None));

    let mut o = opts(96);
    o.only_refactor = true;
    match run(corpus, &o).unwrap() {
        DriverResult::Refactor(outcome) => assert!(!outcome.long_patterns.is_empty()),
        DriverResult::Selection(_) => panic!("expected Refactor outcome"),
    }
}
