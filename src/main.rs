//! CLI entry point for the snomerge pipeline.
//!
//! Provides subcommands for filtering network interaction files, merging
//! NESSRA expansion outputs with duplicate-pair averaging, combining merged
//! tables, and recovering canonical Ensembl IDs for snoRNA targets.

use anyhow::Result;
use clap::{Parser, Subcommand};
use snomerge::merge::{merge_expansions, merge_hybrid, merge_networks};
use snomerge::output::print_json;
use snomerge::recover::{RecoverInputs, recover_canonical};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "snomerge")]
#[command(about = "A tool to merge gene-interaction tables and recover canonical Ensembl IDs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter per-network interaction files and write one CSV per network
    MergeNetworks {
        /// Directory of raw network interaction files
        #[arg(short, long)]
        input_dir: PathBuf,

        /// Directory to write <network>_<threshold>.csv files to
        #[arg(short, long, default_value = "merged_networks")]
        output_dir: PathBuf,

        /// Keep rows with frel strictly above each threshold
        #[arg(short, long, value_delimiter = ',', default_value = "0")]
        thresholds: Vec<f64>,
    },
    /// Merge raw expansion files into one averaged interaction table
    MergeExpansions {
        /// Directories of raw expansion files (e.g. the sno and ribo sets)
        #[arg(short, long, num_args = 1.., required = true)]
        input_dirs: Vec<PathBuf>,

        /// Merged CSV to write
        #[arg(short, long, default_value = "merged_interactions.csv")]
        output: PathBuf,
    },
    /// Merge already-merged x,y,frel tables, averaging shared pairs
    MergeHybrid {
        /// Merged CSVs to combine
        #[arg(num_args = 2.., required = true)]
        inputs: Vec<PathBuf>,

        /// Combined CSV to write
        #[arg(short, long, default_value = "merged_interactions_hybrid.csv")]
        output: PathBuf,
    },
    /// Recover canonical Ensembl IDs for the targets of snoRNAs of interest
    RecoverCanonical {
        /// snoDB TSV export
        #[arg(long)]
        snodb: PathBuf,

        /// Spliceosome (HGNC) TSV export
        #[arg(long)]
        spliceosome: PathBuf,

        /// Ensembl gene-name TSV export
        #[arg(long)]
        gene_names: PathBuf,

        /// Plain-text list of snoRNA gene names, one per line
        #[arg(long)]
        genes: PathBuf,

        /// Report CSV to write
        #[arg(short, long, default_value = "canonical_interactions.csv")]
        output: PathBuf,

        /// Optional JSON run-summary path
        #[arg(long)]
        summary: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/snomerge.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("snomerge.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::MergeNetworks {
            input_dir,
            output_dir,
            thresholds,
        } => {
            let stats = merge_networks(&input_dir, &output_dir, &thresholds)?;
            print_json(&stats)?;
        }
        Commands::MergeExpansions { input_dirs, output } => {
            let stats = merge_expansions(&input_dirs, &output)?;
            print_json(&stats)?;
        }
        Commands::MergeHybrid { inputs, output } => {
            let stats = merge_hybrid(&inputs, &output)?;
            print_json(&stats)?;
        }
        Commands::RecoverCanonical {
            snodb,
            spliceosome,
            gene_names,
            genes,
            output,
            summary,
        } => {
            let inputs = RecoverInputs {
                snodb,
                spliceosome,
                gene_names,
                genes,
            };
            let run = recover_canonical(&inputs, &output, summary.as_deref())?;
            print_json(&run)?;
        }
    }

    Ok(())
}
