//! ZAP output dialect.
//!
//! `.FSTR FSTR?k,"abbrev" ; freq×cost, saved score` lines, a `WORDS::` label
//! plus reference list, terminated by `.ENDI`.

use std::fmt::Write as _;

use crate::adapters::encoding::restore_sentinels;
use crate::pattern::Pattern;

/// Render the selected abbreviations (in table order, index 0 first) as a
/// ZAP abbreviation file body.
pub fn render(selected: &[&Pattern]) -> String {
    let mut out = String::new();
    for (k, p) in selected.iter().enumerate() {
        let abbrev = restore_sentinels(&p.key);
        let escaped = abbrev.replace('"', "\"\"");
        let _ = writeln!(
            out,
            ".FSTR FSTR?{k},\"{escaped}\" ; {freq}×{cost}, saved {savings}",
            k = k + 1,
            freq = p.freq,
            cost = p.cost,
            savings = p.savings,
        );
    }

    out.push_str("WORDS::\n");
    for (k, _) in selected.iter().enumerate() {
        let _ = writeln!(out, "\t.WORD FSTR?{}", k + 1);
    }
    out.push_str(".ENDI\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fstr_words_and_endi() {
        let p = Pattern::new("the ".to_owned(), 4, 3);
        let selected = vec![&p];
        let rendered = render(&selected);
        assert!(rendered.contains(".FSTR FSTR?1,\"the "));
        assert!(rendered.contains("WORDS::"));
        assert!(rendered.trim_end().ends_with(".ENDI"));
    }

    #[test]
    fn restores_sentinels_and_escapes_quotes() {
        let key: String = "say".chars().chain(std::iter::once(crate::alphabet::QUOTE_SENTINEL)).collect();
        let p = Pattern::new(key, 4, 1);
        let selected = vec![&p];
        let rendered = render(&selected);
        assert!(rendered.contains("say\"\""));
    }
}
