use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zabbrev::alphabet::Alphabet;
use zabbrev::corpus::{Corpus, StringRecord};
use zabbrev::pattern::extract_patterns;
use zabbrev::pattern::Pattern;
use zabbrev::rescore::rescore;
use zabbrev::suffix_array::{concat_with_separator, SuffixArray};
use zabbrev::zversion::ZVersion;

fn synthetic_corpus(n_strings: usize, len: usize) -> Vec<String> {
    const LOREM: &str = "the quick brown fox jumps over the lazy dog and runs into the forest";
    let chars: Vec<char> = LOREM.chars().collect();
    (0..n_strings)
        .map(|i| {
            (0..len)
                .map(|j| chars[(i + j) % chars.len()])
                .collect::<String>()
        })
        .collect()
}

fn build_candidates(strings: &[String]) -> (Corpus, Vec<Pattern>, Alphabet) {
    let mut corpus = Corpus::new();
    for s in strings {
        corpus.push(StringRecord::new(s.clone(), false, false, None));
    }
    let alphabet = Alphabet::default();
    let (symbols, offsets) = concat_with_separator(strings);
    let sa = SuffixArray::build(&symbols).unwrap();
    let extraction = extract_patterns(&corpus, &symbols, &offsets, &sa, &alphabet);
    let candidates: Vec<Pattern> = extraction.candidates.into_values().collect();
    (corpus, candidates, alphabet)
}

fn bench_rescore(c: &mut Criterion) {
    let strings = synthetic_corpus(100, 64);
    let (mut corpus, mut candidates, alphabet) = build_candidates(&strings);

    c.bench_function("rescore_full_pass", |b| {
        b.iter(|| {
            black_box(rescore(
                &mut corpus,
                &mut candidates,
                &alphabet,
                ZVersion::V3,
                false,
                true,
            ))
        })
    });
}

criterion_group!(benches, bench_rescore);
criterion_main!(benches);
