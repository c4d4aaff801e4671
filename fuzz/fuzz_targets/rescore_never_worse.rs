#![no_main]

use libfuzzer_sys::fuzz_target;
use zabbrev::alphabet::Alphabet;
use zabbrev::corpus::{Corpus, StringRecord};
use zabbrev::pattern::Pattern;
use zabbrev::rescore::rescore;
use zabbrev::zversion::ZVersion;

/// Invariant 4: the optimal parse can never cost more than the
/// unabbreviated encoding, for any ASCII corpus and any candidate set built
/// from the corpus's own substrings.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 256 {
        return;
    }
    let text: String = data.iter().map(|&b| (b % 95 + 32) as u8 as char).collect();
    if text.chars().any(|c| c == '\u{b}' || c == '@') {
        return;
    }

    let alphabet = Alphabet::default();
    let unabbreviated_cost = alphabet.zstring_cost(&text);

    let mut corpus = Corpus::new();
    corpus.push(StringRecord::new(text.clone(), false, false, None));

    let chars: Vec<char> = text.chars().collect();
    let mut candidates = Vec::new();
    for len in 2..=chars.len().min(6) {
        for start in 0..=(chars.len() - len) {
            let key: String = chars[start..start + len].iter().collect();
            let cost = alphabet.zstring_cost(&key);
            candidates.push(Pattern::new(key, cost, 0));
        }
    }

    rescore(&mut corpus, &mut candidates, &alphabet, ZVersion::V3, false, false);
    assert!(corpus.strings[0].last_cost <= unabbreviated_cost);
});
