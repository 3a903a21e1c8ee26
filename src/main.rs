//! Simdup CLI
//!
//! Streams a line-delimited corpus through the simhash engine. Each
//! non-blank line is one document: it is fingerprinted, checked against
//! everything seen so far, then stored.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use simdup::{SimdupConfig, SimhashEngine};
use tracing_subscriber::{EnvFilter, fmt};

/// Flag near-duplicate lines of text using 64-bit simhash
#[derive(Parser)]
#[command(name = "simdup")]
#[command(version)]
#[command(about = "Flag near-duplicate lines of text using 64-bit simhash")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of index fractions (overrides the config file)
    #[arg(long)]
    fractions: Option<usize>,

    /// Hamming threshold; matches need a strictly smaller distance
    #[arg(long)]
    threshold: Option<u32>,

    /// Print one JSON object per document instead of the plain report
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Input file, one document per line; `-` reads stdin
    input: PathBuf,
}

#[derive(Serialize)]
struct Report {
    line: usize,
    fingerprint: String,
    binary: String,
    duplicate: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let mut cfg = match &cli.config {
        Some(path) => SimdupConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimdupConfig::default(),
    };
    if let Some(fractions) = cli.fractions {
        cfg.index.fraction_count = fractions;
    }
    if let Some(threshold) = cli.threshold {
        cfg.index.hamming_threshold = threshold;
    }
    cfg.validate()?;

    let engine = SimhashEngine::from_config(&cfg)?;

    let reader: Box<dyn BufRead> = if cli.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&cli.input)
            .with_context(|| format!("opening {}", cli.input.display()))?;
        Box::new(BufReader::new(file))
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let mut documents = 0usize;
    let mut duplicates = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        let verdict = engine.process_text(&line)?;
        documents += 1;
        if verdict.duplicate {
            duplicates += 1;
        }

        if cli.json {
            let report = Report {
                line: idx + 1,
                fingerprint: verdict.fingerprint.to_string(),
                binary: verdict.fingerprint.to_binary_string(),
                duplicate: verdict.duplicate,
            };
            serde_json::to_writer(&mut out, &report)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", verdict.fingerprint.to_binary_string())?;
            writeln!(out, "{}", verdict.duplicate)?;
        }
    }
    out.flush()?;

    let stats = engine.index().stats();
    tracing::info!(
        documents,
        duplicates,
        largest_bucket = stats.largest_bucket,
        "corpus processed"
    );

    Ok(())
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
