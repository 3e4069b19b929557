//! CLI tool for finding bad figure labels in a record corpus
//!
//! Scans per-figure JSON records from an S3 prefix or a local directory
//! and prints the identifier of every record judged bad, one per line.
//! Logs go to stderr so stdout stays a clean identifier stream.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use figure_rater::corpus::{check_file, scan_bucket, scan_local_dir, Shard, StoreConfig};
use figure_rater::RaterError;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "find-bad", version)]
#[command(about = "Find bad figure labels in a corpus of figure-extraction records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan records under an S3 bucket prefix
    ReadS3 {
        /// Bucket holding the corpus
        bucket: String,
        /// Key prefix to scan
        path: String,
        /// Which part of the corpus this instance owns
        #[arg(long, default_value_t = 0)]
        chunk: usize,
        /// Of how many parts
        #[arg(long, default_value_t = 1)]
        of: usize,
        /// Write debug output
        #[arg(long)]
        debug: bool,
    },
    /// Scan records in a local directory
    Read {
        /// Directory holding the corpus
        path: PathBuf,
        /// Write debug output
        #[arg(long)]
        debug: bool,
    },
    /// Classify a single record file
    Check {
        /// Record file to classify
        file: PathBuf,
        /// Write debug output
        #[arg(long)]
        debug: bool,
    },
}

impl Command {
    fn debug(&self) -> bool {
        match self {
            Command::ReadS3 { debug, .. }
            | Command::Read { debug, .. }
            | Command::Check { debug, .. } => *debug,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.command.debug() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), RaterError> {
    let mut emit = |id: &str| println!("{}", id);

    match command {
        Command::ReadS3 {
            bucket,
            path,
            chunk,
            of,
            ..
        } => {
            let config = StoreConfig::from_env()?;
            let summary = scan_bucket(&config, &bucket, &path, Shard::new(chunk, of), &mut emit)?;
            info!(
                "scanned {} records, {} bad, {} skipped",
                summary.records, summary.bad, summary.skipped
            );
        }
        Command::Read { path, .. } => {
            let summary = scan_local_dir(&path, &mut emit)?;
            info!(
                "scanned {} records, {} bad, {} skipped",
                summary.records, summary.bad, summary.skipped
            );
        }
        Command::Check { file, .. } => {
            let verdict = check_file(&file)?;
            println!(
                "{}",
                if verdict.is_bad() {
                    "Bad label"
                } else {
                    "Good label"
                }
            );
        }
    }

    Ok(())
}
