//! Inform6 output dialect.
//!
//! `Abbreviate "abbrev";` per line with a trailing comment giving freq,
//! cost, savings; a warning comment is emitted for any abbreviation longer
//! than [`crate::config::INFORM6_MAX_ABBREV_LEN`] (Inform6's 64-character
//! limit).

use std::fmt::Write as _;

use crate::adapters::encoding::restore_sentinels;
use crate::config::INFORM6_MAX_ABBREV_LEN;
use crate::pattern::Pattern;

/// Render the selected abbreviations as Inform6 `Abbreviate` directives.
pub fn render(selected: &[&Pattern]) -> String {
    let mut out = String::new();
    for p in selected {
        let abbrev = restore_sentinels(&p.key);
        if abbrev.chars().count() > INFORM6_MAX_ABBREV_LEN {
            let _ = writeln!(
                out,
                "! Warning: Abbreviation too long ({} chars, limit {}): \"{abbrev}\"",
                abbrev.chars().count(),
                INFORM6_MAX_ABBREV_LEN,
            );
        }
        let escaped = abbrev.replace('"', "\\\"");
        let _ = writeln!(
            out,
            "Abbreviate \"{escaped}\"; ! freq={}, cost={}, savings={}",
            p.freq, p.cost, p.savings,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_abbreviate_directive_with_trailing_comment() {
        let p = Pattern::new("the ".to_owned(), 4, 3);
        let selected = vec![&p];
        let rendered = render(&selected);
        assert!(rendered.contains("Abbreviate \"the \";"));
        assert!(rendered.contains("freq=3"));
    }

    /// Scenario S6: a 70-character abbreviation triggers the
    /// too-long warning.
    #[test]
    fn scenario_s6_warns_on_abbreviation_over_inform6_limit() {
        let key = "x".repeat(70);
        let p = Pattern::new(key, 70, 1);
        let selected = vec![&p];
        let rendered = render(&selected);
        assert!(rendered.contains("Warning: Abbreviation too long"));
    }

    #[test]
    fn short_abbreviation_has_no_warning() {
        let p = Pattern::new("short".to_owned(), 5, 2);
        let selected = vec![&p];
        let rendered = render(&selected);
        assert!(!rendered.contains("Warning"));
    }
}
