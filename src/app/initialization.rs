//! Application initialization and configuration

use anyhow::{Context, Result};
use log::{debug, LevelFilter};
use std::str::FromStr;
use url_frontier::config::ConfigManager;
use url_frontier::frontier::FrontierConfig;
use url_frontier::logging::{self, LogConfig, LogDestination, LogFormat};
use url_frontier::simulation::SimulationConfig;

use crate::cli::Args;

pub fn load_configuration(args: &Args) -> Result<ConfigManager> {
    let mut manager = if let Some(config_file) = &args.config_file {
        ConfigManager::load_from_file(config_file.clone())?
    } else {
        ConfigManager::load()?
    };

    if let Some(section_name) = &args.config_name {
        manager.select_section(section_name.clone());
    }

    Ok(manager)
}

/// Build the logger configuration. Command line flags win over the config file.
pub fn configure_logging(args: &Args, config: &ConfigManager) -> Result<LogConfig> {
    let console_level = if args.debug {
        LevelFilter::Trace
    } else if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else if config.get_bool("base", "quiet")?.unwrap_or(false) {
        LevelFilter::Error
    } else if config.get_bool("base", "verbose")?.unwrap_or(false) {
        LevelFilter::Debug
    } else {
        config.get_log_level("base", "console-level")?.unwrap_or(LevelFilter::Info)
    };

    let format = if args.log_format != "text" {
        LogFormat::from_str(&args.log_format).map_err(|e| anyhow::anyhow!(e))?
    } else {
        match config.get_value("base", "log-format") {
            Some(format_str) => LogFormat::from_str(format_str).map_err(|e| anyhow::anyhow!(e))?,
            None => LogFormat::Text,
        }
    };

    let log_file_path = args.log_file.clone().or_else(|| config.get_path("base", "log-file"));

    let file_log_level = match &args.log_file_level {
        Some(level_str) => Some(logging::parse_log_level(level_str)?),
        None => config.get_log_level("base", "file-log-level")?,
    };

    let (destination, file_level) = match log_file_path {
        Some(path) => {
            let level = file_log_level.unwrap_or(console_level);
            debug!("File logging enabled: {} (level: {:?})", path.display(), level);
            (LogDestination::Both(path), Some(level))
        }
        None => (LogDestination::Console, None),
    };

    Ok(LogConfig {
        console_level,
        file_level,
        format,
        destination,
    })
}

/// Merge frontier settings: config file first, then command line overrides
pub fn frontier_config(args: &Args, config: &ConfigManager) -> Result<FrontierConfig> {
    let mut frontier_config = config.get_frontier_config()?;
    if let Some(capacity) = args.capacity {
        frontier_config.queue_capacity = capacity;
    }
    frontier_config.validate()?;
    Ok(frontier_config)
}

/// Merge simulation settings from the `[simulation]` section and the command line
pub fn build_simulation_config(args: &Args, config: &ConfigManager) -> Result<SimulationConfig> {
    let mut simulation = SimulationConfig::default();

    if let Some(workers) = args.workers.or(config.get_usize("simulation", "workers")?) {
        simulation.workers = workers;
    }
    if let Some(max_pages) = args.max_pages.or(config.get_usize("simulation", "max-pages")?) {
        simulation.max_pages = max_pages;
    }
    if let Some(fanout) = args.fanout.or(config.get_usize("simulation", "fanout")?) {
        simulation.fanout = fanout;
    }
    if let Some(host) = config.get_value("simulation", "host") {
        simulation.host = host.clone();
    }
    simulation.seeds = args.seed.clone();
    simulation.excluded = args.exclude.clone();

    simulation.validate().context("Invalid simulation settings")?;
    Ok(simulation)
}
