use anyhow::Result;
use clap::{ArgAction, Parser};
use log::debug;
use std::path::PathBuf;

/// URL frontier crawl simulator
#[derive(Parser, Debug)]
#[command(name = "frontier-sim")]
#[command(about = "Drive a bounded, deduplicating URL frontier with a synthetic multi-threaded crawl")]
#[command(version)]
pub struct Args {
    /// Verbose output (debug level logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (error level logging only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug output (trace level logging)
    #[arg(long)]
    pub debug: bool,

    /// Log format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log file path for file output
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level for file output (independent of console level)
    #[arg(long, value_name = "LEVEL")]
    pub log_file_level: Option<String>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Configuration section name
    #[arg(long, value_name = "SECTION")]
    pub config_name: Option<String>,

    // ============ FRONTIER CONFIGURATION ============

    /// Maximum number of pending URLs
    #[arg(short = 'c', long = "capacity", value_name = "N")]
    pub capacity: Option<usize>,

    // ============ SIMULATION ============

    /// Number of fetch worker threads (defaults to the number of CPUs)
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Number of pages on the synthetic site
    #[arg(short = 'p', long = "max-pages", value_name = "N")]
    pub max_pages: Option<usize>,

    /// Outlinks per synthetic page
    #[arg(short = 'f', long = "fanout", value_name = "N")]
    pub fanout: Option<usize>,

    /// Seed URL (repeatable); defaults to the first synthetic page
    #[arg(short = 's', long = "seed", value_name = "URL", action = ArgAction::Append)]
    pub seed: Vec<String>,

    /// URL to register as visited before crawling (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "URL", action = ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    let args = Args::parse();
    debug!("Parsed CLI arguments: {:?}", args);
    args
}

/// Validate CLI argument combinations
pub fn validate_args(args: &Args) -> Result<()> {
    let log_flags_count = [args.verbose, args.quiet, args.debug]
        .iter()
        .filter(|&&flag| flag)
        .count();

    if log_flags_count > 1 {
        return Err(anyhow::anyhow!(
            "Conflicting log level flags: only one of --verbose, --quiet, or --debug may be specified"
        ));
    }

    match args.log_format.to_lowercase().as_str() {
        "text" | "json" => {}
        _ => {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Valid options: text, json",
                args.log_format
            ))
        }
    }

    if let Some(ref level) = args.log_file_level {
        if args.log_file.is_none() {
            return Err(anyhow::anyhow!("--log-file-level requires --log-file"));
        }
        url_frontier::logging::parse_log_level(level)?;
    }

    if args.capacity == Some(0) {
        return Err(anyhow::anyhow!("--capacity must be greater than 0"));
    }

    if args.workers == Some(0) {
        return Err(anyhow::anyhow!("--workers must be greater than 0"));
    }

    Ok(())
}
