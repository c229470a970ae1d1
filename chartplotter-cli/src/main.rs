//! Chartplotter CLI - Command-line interface
//!
//! Drives the chartplotter library against recorded device data and the
//! configured history service.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chartplotter::config::ConfigFile;
use chartplotter::logging::init_logging;

use crate::commands::common::load_config;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "chartplotter")]
#[command(about = "Marine chart dashboard tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.chartplotter/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick the movement sensor from a device description
    Select {
        /// JSON file with `resources` and `capabilities`
        #[arg(long)]
        device: PathBuf,
    },

    /// Replay recorded AIS snapshots through the reconciler
    Ais {
        /// JSON file holding an array of snapshots
        #[arg(long)]
        snapshots: PathBuf,
    },

    /// Rebuild a route from a PGN 129285 document
    Route {
        /// JSON route document
        #[arg(long)]
        document: PathBuf,
    },

    /// Show the active chart layer stack
    Layers {
        /// Turn a layer on (repeatable)
        #[arg(long = "on", value_name = "LAYER")]
        on: Vec<String>,

        /// Turn a layer off (repeatable)
        #[arg(long = "off", value_name = "LAYER")]
        off: Vec<String>,
    },

    /// Fetch position history with sensor failover
    History {
        /// Sensor to query first
        #[arg(long)]
        sensor: String,

        /// Failover candidate, tried in order (repeatable)
        #[arg(long = "alternate", value_name = "SENSOR")]
        alternates: Vec<String>,

        /// Hours of history to fetch (default: config lookback_hours)
        #[arg(long)]
        hours: Option<u64>,
    },

    /// Show the config file path and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    let _logging_guard = match init_logging(&config.logging.directory, &config.logging.file) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    if let Err(e) = run(cli.command, cli.config, &config).await {
        e.exit();
    }
}

async fn run(
    command: Commands,
    config_path: Option<PathBuf>,
    config: &ConfigFile,
) -> Result<(), CliError> {
    match command {
        Commands::Select { device } => commands::select::run(&device, config).await,
        Commands::Ais { snapshots } => commands::ais::run(&snapshots, config),
        Commands::Route { document } => commands::route::run(&document, config),
        Commands::Layers { on, off } => commands::layers::run(&on, &off, config),
        Commands::History {
            sensor,
            alternates,
            hours,
        } => commands::history::run(&sensor, alternates, hours, config).await,
        Commands::Config { init } => commands::config::run(config_path.as_deref(), config, init),
    }
}
