//! # CLI Module
//!
//! Command-line interface for dhash-compare.
//!
//! ## Usage
//! ```bash
//! # Distance between two images (prints a single integer)
//! dhash-compare compare a.jpg b.jpg
//!
//! # Larger fingerprints, human-readable report
//! dhash-compare compare a.jpg b.jpg --hash-size 16 --output pretty
//!
//! # Stricter duplicate verdict
//! dhash-compare compare a.jpg b.jpg --strategy conservative --output json
//!
//! # Read one side from stdin
//! curl -s https://example.com/b.jpg | dhash-compare compare a.jpg -
//!
//! # Fingerprint many files in parallel
//! dhash-compare hash ~/Photos/*.jpg
//!
//! # Compare two stored fingerprints
//! dhash-compare distance 8:f0e4c2d7a1b3c5d9 8:f0e4c2d7a1b3c5db
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use dhash_compare::core::comparator::{self, ComparisonStrategy, MatchResult, ThresholdStrategy};
use dhash_compare::core::decoder::{ImageSource, StandardDecoder};
use dhash_compare::core::hasher::{Fingerprint, DEFAULT_BIT_WIDTH};
use dhash_compare::core::pipeline;
use dhash_compare::error::{DecodeError, DhashError, ReportError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

/// dhash-compare - Perceptual fingerprints and image distance
#[derive(Parser, Debug)]
#[command(name = "dhash-compare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the Hamming distance between the fingerprints of two images
    Compare {
        /// First image (`-` reads from stdin)
        first: PathBuf,

        /// Second image (`-` reads from stdin)
        second: PathBuf,

        /// Fingerprint grid size N (fingerprints have N² bits)
        #[arg(short = 's', long, default_value_t = DEFAULT_BIT_WIDTH)]
        hash_size: u32,

        /// Duplicate threshold preset
        #[arg(long, default_value = "balanced")]
        strategy: StrategyPreset,

        /// Custom duplicate threshold on the 64-bit scale (overrides --strategy)
        #[arg(short, long)]
        threshold: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "minimal")]
        output: OutputFormat,
    },

    /// Print the fingerprint of each image
    Hash {
        /// Images to fingerprint
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Fingerprint grid size N (fingerprints have N² bits)
        #[arg(short = 's', long, default_value_t = DEFAULT_BIT_WIDTH)]
        hash_size: u32,

        /// How to print each fingerprint
        #[arg(short, long, default_value = "hex")]
        format: HashFormat,
    },

    /// Print the Hamming distance between two stored fingerprints
    Distance {
        /// First fingerprint, as printed by `hash` (`<N>:<hex>`)
        first: String,

        /// Second fingerprint
        second: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Just the distance
    Minimal,
    /// Human-readable report with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HashFormat {
    /// `<N>:<hex>`, accepted back by `distance`
    Hex,
    /// One 0/1 character per bit, row-major
    Bits,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyPreset {
    /// Exact and near-exact matches only (threshold 4)
    Conservative,
    /// Up to similar (threshold 10)
    Balanced,
    /// Includes possibly similar (threshold 15)
    Permissive,
}

impl StrategyPreset {
    fn strategy(self, threshold: Option<u32>) -> ThresholdStrategy {
        match (threshold, self) {
            (Some(threshold), _) => ThresholdStrategy::new(threshold),
            (None, StrategyPreset::Conservative) => ThresholdStrategy::conservative(),
            (None, StrategyPreset::Balanced) => ThresholdStrategy::balanced(),
            (None, StrategyPreset::Permissive) => ThresholdStrategy::permissive(),
        }
    }
}

/// Run the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    dhash_compare::init_tracing(level);

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Compare {
            first,
            second,
            hash_size,
            strategy,
            threshold,
            output,
        } => run_compare(
            &first,
            &second,
            hash_size,
            &strategy.strategy(threshold),
            output,
            &mut std::io::stdin().lock(),
            &mut out,
        ),
        Commands::Hash {
            paths,
            hash_size,
            format,
        } => run_hash(paths, hash_size, format, &mut out),
        Commands::Distance { first, second } => run_distance(&first, &second, &mut out),
    }
}

/// Turn the outcome of [`run`] into the process exit code, reporting errors on stderr
pub fn exit_code(result: Result<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_compare(
    first: &Path,
    second: &Path,
    hash_size: u32,
    strategy: &ThresholdStrategy,
    output: OutputFormat,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<ExitCode> {
    if is_stdin(first) && is_stdin(second) {
        return Err(DhashError::Config(
            "stdin (`-`) can supply only one of the two images".to_string(),
        ));
    }

    let a = source_from_arg(first, input)?;
    let b = source_from_arg(second, input)?;

    let result = pipeline::compare_sources_with(&StandardDecoder::new(), &a, &b, hash_size, strategy)?;

    match output {
        OutputFormat::Minimal => writeln!(out, "{}", result.distance).map_err(ReportError::from)?,
        OutputFormat::Pretty => write_pretty_result(out, &result, strategy)?,
        OutputFormat::Json => write_json(out, &result)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn run_hash(paths: Vec<PathBuf>, hash_size: u32, format: HashFormat, out: &mut dyn Write) -> Result<ExitCode> {
    let sources: Vec<ImageSource> = paths.into_iter().map(ImageSource::Path).collect();

    let progress = if sources.len() > 1 && Term::stderr().is_term() {
        let pb = ProgressBar::new(sources.len() as u64);
        if let Ok(bar_style) =
            ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(bar_style.progress_chars("█▓░"));
        }
        Some(pb)
    } else {
        None
    };

    let results = pipeline::fingerprint_many_with_progress(
        &StandardDecoder::new(),
        &sources,
        hash_size,
        |_| {
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        },
    )?;

    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let mut failures = 0;
    for (source, fingerprint) in results {
        match fingerprint {
            Ok(fingerprint) => {
                let rendered = match format {
                    HashFormat::Hex => fingerprint.to_string(),
                    HashFormat::Bits => fingerprint.to_bit_string(),
                };
                writeln!(out, "{}\t{}", source, rendered).map_err(ReportError::from)?;
            }
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", style("error:").red().bold(), source, e);
            }
        }
    }

    if failures > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_distance(first: &str, second: &str, out: &mut dyn Write) -> Result<ExitCode> {
    let a: Fingerprint = first.parse()?;
    let b: Fingerprint = second.parse()?;

    writeln!(out, "{}", comparator::distance(&a, &b)?).map_err(ReportError::from)?;
    Ok(ExitCode::SUCCESS)
}

fn is_stdin(arg: &Path) -> bool {
    arg == Path::new("-")
}

/// `-` means the bytes of `input`, anything else is a path
fn source_from_arg(arg: &Path, input: &mut dyn Read) -> Result<ImageSource> {
    if !is_stdin(arg) {
        return Ok(ImageSource::Path(arg.to_path_buf()));
    }

    let mut data = Vec::new();
    input.read_to_end(&mut data).map_err(|source| DecodeError::Io {
        path: PathBuf::from("-"),
        source,
    })?;
    Ok(ImageSource::bytes("<stdin>", data))
}

fn write_pretty_result(
    out: &mut dyn Write,
    result: &MatchResult,
    strategy: &dyn ComparisonStrategy,
) -> std::result::Result<(), ReportError> {
    let verdict = if result.is_duplicate {
        style("likely duplicates").green().bold()
    } else {
        style("not duplicates").yellow().bold()
    };

    writeln!(out, "{} {}", style("A:").dim(), result.source_a)?;
    writeln!(out, "   {}", style(&result.fingerprint_a).cyan())?;
    writeln!(out, "{} {}", style("B:").dim(), result.source_b)?;
    writeln!(out, "   {}", style(&result.fingerprint_b).cyan())?;
    writeln!(out)?;
    writeln!(
        out,
        "  {} of {} bits differ ({:.1}% similar)",
        style(result.distance).cyan().bold(),
        result.fingerprint_a.len(),
        result.similarity_percent
    )?;
    writeln!(out, "  {} - {}", style(result.match_type).bold(), verdict)?;
    writeln!(out, "  {}", style(strategy.description()).dim())?;
    Ok(())
}

fn write_json(out: &mut dyn Write, result: &MatchResult) -> std::result::Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    Ok(())
}
