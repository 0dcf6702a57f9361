//! Drives the wordvault core at volume and reports empirical distributions.
//!
//! Three reports, each with a chi-square statistic against the uniform
//! expectation:
//!
//! - index draws over a configurable range
//! - where the first phrase word lands after shuffling
//! - which positions the verification challenge prompts for
//!
//! With `seed` set the run is fully reproducible; without it the platform
//! CSPRNG is used, as in production.

use anyhow::{bail, Context, Result};
use clap::{Arg, Command};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, Level};
use wordvault_core::{
    pick_verification_indices, random_index, shuffle, EntropySource, OsEntropy, SeededEntropy,
};

/// Simulator configuration (from an optional YAML config file).
#[derive(Serialize, Deserialize)]
#[serde(default)]
struct Config {
    /// Trials per report.
    trials: usize,
    /// Phrase length for the shuffle and selection reports.
    word_count: usize,
    /// Index draws are sampled from `[0, range_max]`.
    range_max: u64,
    /// Seed for a reproducible run; omit to use the platform CSPRNG.
    seed: Option<u64>,
    log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trials: 100_000,
            word_count: 12,
            range_max: 11,
            seed: None,
            log_level: "info".into(),
        }
    }
}

struct ReportRow {
    report: &'static str,
    trials: usize,
    buckets: usize,
    chi_square: f64,
    critical: f64,
}

fn main() -> Result<()> {
    // Parse arguments
    let matches = Command::new("wordvault-simulator")
        .about("Empirically checks wordvault's sampling, shuffling, and selection.")
        .arg(Arg::new("config").long("config").required(false))
        .get_matches();

    // Load from config file, or run with defaults
    let config = match matches.get_one::<String>("config") {
        Some(path) => {
            let raw = std::fs::read_to_string(path).context("could not read config file")?;
            serde_yaml::from_str(&raw).context("could not parse config file")?
        }
        None => Config::default(),
    };
    if config.trials == 0 {
        bail!("trials must be > 0");
    }
    if config.word_count < 3 {
        bail!("word_count must be >= 3 (got {})", config.word_count);
    }
    if config.range_max == 0 {
        bail!("range_max must be > 0");
    }

    // Setup logging
    let level = Level::from_str(&config.log_level)
        .map_err(|_| anyhow::anyhow!("invalid log level: {}", config.log_level))?;
    tracing_subscriber::fmt().with_max_level(level).init();
    info!(
        trials = config.trials,
        word_count = config.word_count,
        range_max = config.range_max,
        seed = ?config.seed,
        "starting simulator"
    );

    let rows = match config.seed {
        Some(seed) => run(&mut SeededEntropy::from_u64(seed), &config)?,
        None => run(&mut OsEntropy, &config)?,
    };
    print_rows(&rows);

    if rows.iter().any(|row| row.chi_square >= row.critical) {
        bail!("at least one report exceeded its chi-square critical value");
    }
    Ok(())
}

fn run(source: &mut impl EntropySource, config: &Config) -> Result<Vec<ReportRow>> {
    Ok(vec![
        index_report(source, config)?,
        shuffle_report(source, config)?,
        selection_report(source, config)?,
    ])
}

/// Frequencies of `random_index(0, range_max)`.
fn index_report(source: &mut impl EntropySource, config: &Config) -> Result<ReportRow> {
    let buckets = config.range_max as usize + 1;
    let mut counts = vec![0u64; buckets];
    for _ in 0..config.trials {
        counts[random_index(source, 0, config.range_max)? as usize] += 1;
    }
    Ok(report("index draws", config.trials, &counts))
}

/// Where the first word lands after a shuffle.
fn shuffle_report(source: &mut impl EntropySource, config: &Config) -> Result<ReportRow> {
    let input: Vec<usize> = (0..config.word_count).collect();
    let mut landed = vec![0u64; config.word_count];
    for _ in 0..config.trials {
        let shuffled = shuffle(source, &input)?;
        let position = shuffled
            .iter()
            .position(|&word| word == 0)
            .expect("shuffle preserves every element");
        landed[position] += 1;
    }
    Ok(report("shuffle placement", config.trials, &landed))
}

/// How often each position is prompted for across challenges.
fn selection_report(source: &mut impl EntropySource, config: &Config) -> Result<ReportRow> {
    let mut counts = vec![0u64; config.word_count.min(24)];
    for _ in 0..config.trials {
        for index in pick_verification_indices(source, config.word_count)? {
            counts[index] += 1;
        }
    }
    Ok(report("challenge positions", config.trials, &counts))
}

fn report(name: &'static str, trials: usize, counts: &[u64]) -> ReportRow {
    let total: u64 = counts.iter().sum();
    let expected = total as f64 / counts.len() as f64;
    let chi_square = counts
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum();
    ReportRow {
        report: name,
        trials,
        buckets: counts.len(),
        chi_square,
        critical: critical_value(counts.len() - 1),
    }
}

/// Wilson-Hilferty approximation of the chi-square critical value at
/// p = 0.001 for `df` degrees of freedom.
fn critical_value(df: usize) -> f64 {
    const Z: f64 = 3.09; // standard normal quantile for p = 0.001
    let df = df as f64;
    let term = 1.0 - 2.0 / (9.0 * df) + Z * (2.0 / (9.0 * df)).sqrt();
    df * term * term * term
}

fn print_rows(rows: &[ReportRow]) {
    println!(
        "{:<20} {:>10} {:>8} {:>12} {:>12}   verdict",
        "report", "trials", "buckets", "chi-square", "critical"
    );
    for row in rows {
        println!(
            "{:<20} {:>10} {:>8} {:>12.2} {:>12.2}   {}",
            row.report,
            row.trials,
            row.buckets,
            row.chi_square,
            row.critical,
            if row.chi_square < row.critical {
                "ok"
            } else {
                "BIASED"
            }
        );
    }
}
