//! Binary entry point for the `zabbrev` command-line tool.
//!
//! Reads a game's source text via one of three input dialects, runs the
//! selection pipeline, and emits the chosen abbreviations in ZAP or
//! Inform6 dialect.

use anyhow::{bail, Context, Result};
use clap::Parser;

use zabbrev::adapters::encoding::CharsetOverride;
use zabbrev::adapters::{inform6, output_inform, output_zap, txd, zap};
use zabbrev::cli::args::{Cli, OutputDialect};
use zabbrev::cli::constants::set_display_level;
use zabbrev::corpus::Corpus;
use zabbrev::driver::{DriverOptions, DriverResult};
use zabbrev::zversion::ZVersion;
use zabbrev::{displaylevel, debugoutput};

/// Everything one of the three read paths can contribute.
struct Ingested {
    corpus: Corpus,
    version: Option<ZVersion>,
    dialect: OutputDialect,
}

fn read_input(cli: &Cli) -> Result<Ingested> {
    let charset: Option<CharsetOverride> = cli.charset;

    if let (Some(infodump_path), Some(txd_path)) = (&cli.infodump, &cli.txd) {
        let mut corpus = Corpus::new();
        let infodump_text = std::fs::read_to_string(infodump_path)
            .with_context(|| format!("reading infodump file {}", infodump_path.display()))?;
        txd::parse_infodump(&infodump_text, &mut corpus);
        let txd_text = std::fs::read_to_string(txd_path)
            .with_context(|| format!("reading txd file {}", txd_path.display()))?;
        txd::parse_txd(&txd_text, &mut corpus);
        return Ok(Ingested {
            corpus,
            version: None,
            dialect: OutputDialect::Zap,
        });
    }

    if cli.input.is_dir() {
        let result = zap::scan_directory(&cli.input, charset)
            .with_context(|| format!("scanning game directory {}", cli.input.display()))?;
        return Ok(Ingested {
            corpus: result.corpus,
            version: result.version,
            dialect: OutputDialect::Zap,
        });
    }

    if !cli.input.exists() {
        bail!("input path not found: {}", cli.input.display());
    }

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("reading transcript {}", cli.input.display()))?;
    let text = zabbrev::adapters::encoding::decode(&bytes, charset);
    let result = inform6::parse_transcript(&text);
    Ok(Ingested {
        corpus: result.corpus,
        version: result.version,
        dialect: OutputDialect::Inform6,
    })
}

fn run(cli: Cli) -> Result<i32> {
    set_display_level(cli.display_level());

    let ingested = read_input(&cli)?;
    if ingested.corpus.is_empty() {
        displaylevel!(1, "zabbrev: empty corpus, nothing to abbreviate\n");
        return Ok(1);
    }

    let version = cli
        .zversion()
        .or(ingested.version)
        .unwrap_or(ZVersion::V3);

    let explicit_alphabet = cli.explicit_alphabet().map(|(alphabet, warnings)| {
        for w in &warnings {
            displaylevel!(1, "{}", w);
        }
        alphabet
    });

    let opts = DriverOptions {
        n: cli.n,
        version,
        force_r3: cli.force_r3,
        throw_back: cli.throw_back,
        level: cli.compression_level(),
        auto_alphabet: cli.auto_alphabet,
        explicit_alphabet,
        only_refactor: cli.only_refactor,
    };

    debugoutput!("zabbrev: {} string(s) ingested, z-version {}\n", ingested.corpus.len(), version);

    let result = zabbrev::driver::run(ingested.corpus, &opts)
        .with_context(|| "running selection pipeline")?;

    match result {
        DriverResult::Refactor(outcome) => {
            for p in &outcome.long_patterns {
                println!(
                    "{} ; len {}",
                    zabbrev::adapters::encoding::restore_sentinels(&p.key),
                    p.key.chars().count()
                );
            }
        }
        DriverResult::Selection(outcome) => {
            if outcome.unsupported_alphabet_warning {
                displaylevel!(2, "warning: custom alphabet requires z-version 5+\n");
            }
            if let Some(savings) = outcome.custom_alphabet_savings {
                displaylevel!(2, "custom alphabet saves {savings} z-char(s) over the default tables\n");
            }
            let dialect = match cli.output_dialect {
                None | Some(OutputDialect::SameAsInput) => ingested.dialect,
                Some(explicit) => explicit,
            };
            let selected_refs: Vec<&zabbrev::pattern::Pattern> = outcome.selected.iter().collect();
            let rendered = match dialect {
                OutputDialect::Inform6 => output_inform::render(&selected_refs),
                OutputDialect::Zap => output_zap::render(&selected_refs),
                OutputDialect::SameAsInput => unreachable!("resolved to ingested.dialect above"),
            };
            print!("{rendered}");
        }
    }

    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("zabbrev: {e:#}");
            1
        }
    };
    std::process::exit(exit_code);
}
