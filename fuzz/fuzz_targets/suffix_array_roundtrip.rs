#![no_main]

use libfuzzer_sys::fuzz_target;
use zabbrev::suffix_array::SuffixArray;

/// Invariant 6: the suffix array must stay sorted and the LCP
/// array must match the suffixes' actual common-prefix length, for any
/// input symbol stream.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let symbols: Vec<u32> = data.iter().map(|&b| b as u32).collect();
    let Ok(sa) = SuffixArray::build(&symbols) else {
        return;
    };

    for i in 1..sa.sa().len() {
        let a = &symbols[sa.sa()[i - 1] as usize..];
        let b = &symbols[sa.sa()[i] as usize..];
        assert!(a <= b, "suffix array out of order at rank {i}");

        let common = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
        assert_eq!(sa.lcp()[i] as usize, common, "lcp mismatch at rank {i}");
    }
});
