mod app;
mod cli;

use anyhow::Result;
use log::{error, info};
use std::process;
use std::sync::Arc;
use url_frontier::frontier::UrlFrontier;
use url_frontier::{logging, simulation};

fn main() {
    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args();
    cli::validate_args(&args)?;

    let config_manager = app::load_configuration(&args)?;

    let log_config = app::configure_logging(&args, &config_manager)?;
    logging::init_logger(log_config)?;

    let frontier_config = app::frontier_config(&args, &config_manager)?;
    let simulation_config = app::build_simulation_config(&args, &config_manager)?;
    info!(
        "Starting crawl: capacity {}, {} workers, {} pages, fanout {}",
        frontier_config.queue_capacity,
        simulation_config.workers,
        simulation_config.max_pages,
        simulation_config.fanout
    );

    let frontier = Arc::new(UrlFrontier::from_config(&frontier_config));
    let report = simulation::run_simulation(Arc::clone(&frontier), &simulation_config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Pages: {} | URLs: {} | {} | Elapsed: {:?}",
            report.pages_fetched, report.distinct_urls, report.stats, report.elapsed
        );
    }

    Ok(())
}
