//! rustpid: command-line particle identification for cluster centroids.
//!
//! Reads a centroid table (`Xpos`, `Ypos` columns), labels every centroid
//! with a particle class and writes the labeled table.
#![allow(clippy::uninlined_format_args)]

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use rustpid_core::{
    CentroidTable, ClassifierConfig, ParticleClass, ParticleClassifier, ReferenceMode,
    RelativePositions, Thresholds, VisitOrder,
};
use rustpid_io::{read_centroids_csv, LabeledTableWriter, OutputFormat};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

/// Result type for CLI operations.
type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("I/O error: {0}")]
    RustpidIo(#[from] rustpid_io::Error),

    #[error("Core error: {0}")]
    Core(#[from] rustpid_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output encoding.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Xpos,Ypos,Particle Label rows
    Csv,
    /// Centroid records with a label summary
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
        }
    }
}

/// Reference-row resolution for the triton and deuteron reference rules.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Reference {
    /// Any previously labeled row may satisfy each condition
    Any,
    /// Only the last row of the table is inspected
    Last,
}

impl From<Reference> for ReferenceMode {
    fn from(reference: Reference) -> Self {
        match reference {
            Reference::Any => ReferenceMode::AnyNeighbor,
            Reference::Last => ReferenceMode::LastNeighbor,
        }
    }
}

/// Geometric particle identification for detector cluster centroids.
#[derive(Parser)]
#[command(name = "rustpid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label every centroid of a CSV table with a particle class
    Classify {
        /// Input CSV with Xpos and Ypos columns
        input: PathBuf,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (inferred from the output extension if omitted)
        #[arg(short, long, value_enum)]
        format: Option<Format>,

        /// Row visit order as comma-separated indices, e.g. 1,2,0,3
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<usize>>,

        /// How reference rules pick their reference rows
        #[arg(long, value_enum, default_value = "any")]
        reference_mode: Reference,

        /// Keep labels already present in the input as references
        #[arg(long)]
        keep_labels: bool,

        /// Protons must lie below this y
        #[arg(long, default_value_t = Thresholds::DEFAULT_PROTON_MAX_Y)]
        proton_max_y: f64,

        /// Alphas must lie left of this x
        #[arg(long, default_value_t = Thresholds::DEFAULT_ALPHA_MAX_X)]
        alpha_max_x: f64,

        /// Alphas must lie above this y
        #[arg(long, default_value_t = Thresholds::DEFAULT_ALPHA_MIN_Y)]
        alpha_min_y: f64,
    },

    /// Print the relative-position matrices of a CSV table
    Matrices {
        /// Input CSV with Xpos and Ypos columns
        input: PathBuf,

        /// Print as JSON instead of aligned text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Classify {
            input,
            output,
            format,
            order,
            reference_mode,
            keep_labels,
            proton_max_y,
            alpha_max_x,
            alpha_min_y,
        } => {
            let start = Instant::now();
            let mut table = read_centroids_csv(&input)?;
            info!("Read {} centroids from {}", table.len(), input.display());

            let config = ClassifierConfig::new()
                .with_proton_max_y(proton_max_y)
                .with_alpha_max_x(alpha_max_x)
                .with_alpha_min_y(alpha_min_y)
                .with_reference_mode(reference_mode.into())
                .with_visit_order(order.map_or(VisitOrder::RowIndex, VisitOrder::Explicit))
                .with_reset_labels(!keep_labels);
            info!("Classifier config: {:?}", config);

            let mut classifier = ParticleClassifier::new(config);
            classifier.classify(&mut table)?;

            let format = resolve_format(format, output.as_deref());
            match &output {
                Some(path) => {
                    info!("Writing output to: {}", path.display());
                    LabeledTableWriter::create(path)?.write(&table, format)?;
                }
                None => {
                    let stdout = io::stdout();
                    LabeledTableWriter::new(BufWriter::new(stdout.lock())).write(&table, format)?;
                }
            }

            print_summary(&table);
            info!("Classified in {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);
        }

        Commands::Matrices { input, json } => {
            let table = read_centroids_csv(&input)?;
            let relative = RelativePositions::compute(&table);
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());

            if json {
                let document = serde_json::json!({
                    "x": matrix_rows(&relative, RelativePositions::dx),
                    "y": matrix_rows(&relative, RelativePositions::dy),
                });
                serde_json::to_writer_pretty(&mut out, &document)?;
                writeln!(out)?;
            } else {
                write_matrix(&mut out, "Xrel", &relative, RelativePositions::dx)?;
                writeln!(out)?;
                write_matrix(&mut out, "Yrel", &relative, RelativePositions::dy)?;
            }
            out.flush()?;
        }
    }

    Ok(())
}

fn resolve_format(format: Option<Format>, output: Option<&Path>) -> OutputFormat {
    if let Some(format) = format {
        return format.into();
    }
    match output {
        Some(path) => OutputFormat::from_path(path).unwrap_or_else(|| {
            warn!(
                "Unknown extension for '{}', defaulting to CSV",
                path.display()
            );
            OutputFormat::Csv
        }),
        None => OutputFormat::Csv,
    }
}

fn print_summary(table: &CentroidTable) {
    let counts = table.label_counts();
    eprintln!("Centroids: {}", table.len());
    for class in ParticleClass::ALL {
        eprintln!("  {:<10} {}", class, counts.get(class));
    }
    eprintln!("  {:<10} {}", "Unset", counts.unclassified);
}

fn matrix_rows(
    relative: &RelativePositions,
    entry: fn(&RelativePositions, usize, usize) -> f64,
) -> Vec<Vec<f64>> {
    let n = relative.len();
    (0..n)
        .map(|i| (0..n).map(|j| entry(relative, i, j)).collect())
        .collect()
}

fn write_matrix<W: Write>(
    out: &mut W,
    name: &str,
    relative: &RelativePositions,
    entry: fn(&RelativePositions, usize, usize) -> f64,
) -> io::Result<()> {
    writeln!(out, "{}", name)?;
    write!(out, "{:>6}", "")?;
    for j in 0..relative.len() {
        write!(out, " {:>12}", j)?;
    }
    writeln!(out)?;
    for (i, row) in matrix_rows(relative, entry).into_iter().enumerate() {
        write!(out, "{:>6}", i)?;
        for value in row {
            write!(out, " {:>12.3}", value)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
