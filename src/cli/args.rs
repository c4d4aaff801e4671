//! Command-line argument parsing, via `clap`'s derive API.
//!
//! `-v1..v8` (z-version) and `-v` (diagnostics verbosity) would collide
//! under a single-dash convention; that is resolved here by giving
//! z-version a `--zversion <N>` long option (no short alias) and keeping
//! `-v`/`--verbose` for diagnostics — see DESIGN.md.

use std::path::PathBuf;

use clap::Parser;

use crate::adapters::encoding::CharsetOverride;
use crate::alphabet::Alphabet;
use crate::config::{N_DEFAULT, NUM_DEEP_PASSES_DEFAULT, NUM_PASSES_DEFAULT};
use crate::refine::CompressionLevel;
use crate::zversion::ZVersion;

/// Output dialect override (`-o 0|1|2` or `input|inform|ZAP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDialect {
    /// Same dialect the input was read in.
    SameAsInput,
    Inform6,
    Zap,
}

impl std::str::FromStr for OutputDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "input" => Ok(OutputDialect::SameAsInput),
            "1" | "inform" | "inform6" => Ok(OutputDialect::Inform6),
            "2" | "zap" => Ok(OutputDialect::Zap),
            other => Err(format!("unrecognized output dialect {other:?}")),
        }
    }
}

/// Compute near-optimal Z-machine string abbreviations.
#[derive(Parser, Debug)]
#[command(name = "zabbrev", author, version, about)]
pub struct Cli {
    /// Game directory (ZAP dialect) or transcript file path.
    pub input: PathBuf,

    /// Abbreviation count.
    #[arg(short = 'n', default_value_t = N_DEFAULT)]
    pub n: usize,

    /// Build a custom per-game alphabet from character frequency (`-a`).
    #[arg(short = 'a', long = "auto-alphabet")]
    pub auto_alphabet: bool,

    /// Explicit 26-character A0 table (`-a0`).
    #[arg(long = "a0")]
    pub a0: Option<String>,
    /// Explicit 26-character A1 table (`-a1`).
    #[arg(long = "a1")]
    pub a1: Option<String>,
    /// Explicit 23-character A2 table (`-a2`).
    #[arg(long = "a2")]
    pub a2: Option<String>,

    /// Force rounding unit 3 regardless of z-version (`-r3`).
    #[arg(long = "r3")]
    pub force_r3: bool,

    /// Target z-machine version 1–8; auto-detected if omitted.
    #[arg(long = "zversion", value_parser = clap::value_parser!(u8).range(1..=8))]
    pub zversion: Option<u8>,

    /// No refinement (`-x0`).
    #[arg(long = "x0")]
    pub x0: bool,
    /// Boundary adjustment only (`-x1`).
    #[arg(long = "x1")]
    pub x1: bool,
    /// Normal replacement-from-residue + boundary adjustment (`-x2`, default).
    #[arg(long = "x2")]
    pub x2: bool,
    /// Maximum (deep) replacement-from-residue + boundary adjustment (`-x3`).
    #[arg(long = "x3")]
    pub x3: bool,
    /// Override the `-x2`/`-x3` pass budget (default 10 000).
    #[arg(long = "num-passes")]
    pub num_passes: Option<usize>,
    /// Override the `-x3` deep-pass budget (default 1 000).
    #[arg(long = "num-deep-passes")]
    pub num_deep_passes: Option<usize>,

    /// Enable throw-back-low-scorers during selection (`-b`).
    #[arg(short = 'b', long = "throw-back")]
    pub throw_back: bool,

    /// Output dialect override (`-o`).
    #[arg(short = 'o', long = "output-dialect")]
    pub output_dialect: Option<OutputDialect>,

    /// Skip selection; emit the long-duplicate refactoring-hint report.
    #[arg(long = "onlyrefactor")]
    pub only_refactor: bool,

    /// Force Inform6 transcript parsing (auto-detected by default) (`-i`).
    #[arg(short = 'i', long = "inform6")]
    pub force_inform6: bool,

    /// Read object descriptions from an Infodump `-io` dump.
    #[arg(long = "infodump")]
    pub infodump: Option<PathBuf>,
    /// Read inline/packed strings from a TXD `-ag` disassembly.
    #[arg(long = "txd")]
    pub txd: Option<PathBuf>,

    /// Raise diagnostics to debug level.
    #[arg(long = "debug")]
    pub debug: bool,

    /// Raise diagnostics verbosity; may be repeated.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Source character-set override (`-c0|-cu|-c1`); auto-detected if
    /// omitted.
    #[arg(short = 'c', long = "charset")]
    pub charset: Option<CharsetOverride>,
}

fn parse_table<const N: usize>(s: &str) -> Result<[char; N], usize> {
    let chars: Vec<char> = s.chars().collect();
    let got = chars.len();
    chars.try_into().map_err(|_| got)
}

/// Splice 23 user-supplied punctuation characters into the 26-slot A2
/// table, leaving the three reserved slots (escape, newline, quote) at
/// their default values.
fn splice_a2(chars23: &[char; 23]) -> [char; 26] {
    let reserved = crate::alphabet::a2_reserved_slots();
    let mut a2 = crate::alphabet::DEFAULT_A2;
    let mut supplied = chars23.iter();
    for (slot, c) in a2.iter_mut().enumerate() {
        if !reserved.contains(&slot) {
            *c = *supplied.next().expect("23 supplied chars fill exactly the 23 non-reserved slots");
        }
    }
    a2
}

impl Cli {
    /// Resolve the `-x*` flags into a [`CompressionLevel`].
    /// `-x2` is the implicit default when none of `-x0..x3` is given.
    pub fn compression_level(&self) -> CompressionLevel {
        let num_passes = self.num_passes.unwrap_or(NUM_PASSES_DEFAULT);
        let num_deep_passes = self.num_deep_passes.unwrap_or(NUM_DEEP_PASSES_DEFAULT);
        if self.x0 {
            CompressionLevel::Level0
        } else if self.x1 {
            CompressionLevel::Level1
        } else if self.x3 {
            CompressionLevel::Level3 {
                num_passes,
                num_deep_passes,
            }
        } else {
            CompressionLevel::Level2 { num_passes }
        }
    }

    /// Resolve `--zversion`, if given, into a [`ZVersion`].
    pub fn zversion(&self) -> Option<ZVersion> {
        self.zversion.and_then(ZVersion::from_digit)
    }

    /// Net diagnostics level: `--debug` forces 4; each `-v` adds one above
    /// the default of 2.
    pub fn display_level(&self) -> u32 {
        if self.debug {
            4
        } else {
            2 + self.verbose as u32
        }
    }

    /// Resolve `-a0`/`-a1`/`-a2` into an [`Alphabet`], starting from the
    /// default tables and overwriting whichever of the three the user gave.
    /// A table of the wrong length falls back to its default and produces a
    /// warning string instead of failing the run. Returns `None` if none of
    /// the three flags were given.
    pub fn explicit_alphabet(&self) -> Option<(Alphabet, Vec<String>)> {
        if self.a0.is_none() && self.a1.is_none() && self.a2.is_none() {
            return None;
        }

        let mut alphabet = Alphabet::default();
        let mut warnings = Vec::new();

        if let Some(s) = &self.a0 {
            match parse_table::<26>(s) {
                Ok(table) => alphabet.set_a0(table),
                Err(got) => warnings.push(format!(
                    "warning: -a0 expects 26 characters, got {got}; using default A0\n"
                )),
            }
        }
        if let Some(s) = &self.a1 {
            match parse_table::<26>(s) {
                Ok(table) => alphabet.set_a1(table),
                Err(got) => warnings.push(format!(
                    "warning: -a1 expects 26 characters, got {got}; using default A1\n"
                )),
            }
        }
        if let Some(s) = &self.a2 {
            match parse_table::<23>(s) {
                Ok(table) => alphabet.set_a2(splice_a2(&table)),
                Err(got) => warnings.push(format!(
                    "warning: -a2 expects 23 characters, got {got}; using default A2\n"
                )),
            }
        }

        Some((alphabet, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_n_is_96() {
        let cli = Cli::parse_from(["zabbrev", "game/"]);
        assert_eq!(cli.n, 96);
    }

    #[test]
    fn x3_resolves_to_level3_with_overrides() {
        let cli = Cli::parse_from([
            "zabbrev",
            "game/",
            "--x3",
            "--num-passes",
            "5",
            "--num-deep-passes",
            "2",
        ]);
        match cli.compression_level() {
            CompressionLevel::Level3 {
                num_passes,
                num_deep_passes,
            } => {
                assert_eq!(num_passes, 5);
                assert_eq!(num_deep_passes, 2);
            }
            _ => panic!("expected Level3"),
        }
    }

    #[test]
    fn default_compression_level_is_level2() {
        let cli = Cli::parse_from(["zabbrev", "game/"]);
        assert!(matches!(cli.compression_level(), CompressionLevel::Level2 { .. }));
    }

    #[test]
    fn output_dialect_parses_names_and_digits() {
        assert_eq!("ZAP".parse::<OutputDialect>().unwrap(), OutputDialect::Zap);
        assert_eq!("1".parse::<OutputDialect>().unwrap(), OutputDialect::Inform6);
        assert!("bogus".parse::<OutputDialect>().is_err());
    }

    #[test]
    fn debug_flag_forces_level_four() {
        let cli = Cli::parse_from(["zabbrev", "game/", "--debug"]);
        assert_eq!(cli.display_level(), 4);
    }

    #[test]
    fn no_explicit_alphabet_flags_returns_none() {
        let cli = Cli::parse_from(["zabbrev", "game/"]);
        assert!(cli.explicit_alphabet().is_none());
    }

    #[test]
    fn explicit_a0_overrides_default_table() {
        let cli = Cli::parse_from(["zabbrev", "game/", "--a0", "zyxwvutsrqponmlkjihgfedcba"]);
        let (alphabet, warnings) = cli.explicit_alphabet().unwrap();
        assert!(warnings.is_empty());
        assert_eq!(alphabet.a0()[0], 'z');
    }

    #[test]
    fn wrong_length_a0_warns_and_falls_back_to_default() {
        let cli = Cli::parse_from(["zabbrev", "game/", "--a0", "abc"]);
        let (alphabet, warnings) = cli.explicit_alphabet().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("-a0"));
        assert_eq!(alphabet.a0(), &crate::alphabet::DEFAULT_A0);
    }

    #[test]
    fn explicit_a2_splices_into_non_reserved_slots_only() {
        let cli = Cli::parse_from(["zabbrev", "game/", "--a2", "ZYXWVUTSRQPONMLKJIHGFED"]);
        let (alphabet, warnings) = cli.explicit_alphabet().unwrap();
        assert!(warnings.is_empty());
        let reserved = crate::alphabet::a2_reserved_slots();
        for &slot in &reserved {
            assert_eq!(alphabet.a2()[slot], crate::alphabet::DEFAULT_A2[slot]);
        }
        assert_eq!(alphabet.a2()[2], 'Z');
    }

    #[test]
    fn wrong_length_a2_warns_and_falls_back_to_default() {
        let cli = Cli::parse_from(["zabbrev", "game/", "--a2", "short"]);
        let (alphabet, warnings) = cli.explicit_alphabet().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("-a2"));
        assert_eq!(alphabet.a2(), &crate::alphabet::DEFAULT_A2);
    }

    #[test]
    fn charset_flag_parses() {
        let cli = Cli::parse_from(["zabbrev", "game/", "-c", "u"]);
        assert_eq!(cli.charset, Some(CharsetOverride::Utf8));
    }
}
