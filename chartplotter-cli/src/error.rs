//! CLI error handling with user-friendly messages.

use std::fmt;
use std::process;

use chartplotter::config::{config_file_path, ConfigFileError};
use chartplotter::history::HistoryError;
use chartplotter::route::DocumentError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(ConfigFileError),
    /// Failed to read an input file
    FileRead { path: String, error: std::io::Error },
    /// Input file is not the expected JSON
    Parse {
        path: String,
        error: serde_json::Error,
    },
    /// Route document could not be decoded
    Document(DocumentError),
    /// Layer name not in the catalog
    UnknownLayer(String),
    /// History query failed
    History(HistoryError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::History(HistoryError::NoEndpoint) => {
                eprintln!();
                eprintln!("Set the aggregation service URL in the config file:");
                eprintln!("  {}", config_file_path().display());
                eprintln!();
                eprintln!("  [history]");
                eprintln!("  endpoint = https://boat.example/api/history");
            }
            CliError::UnknownLayer(_) => {
                eprintln!();
                eprintln!(
                    "Known layers: {}",
                    chartplotter::layers::LAYER_NAMES.join(", ")
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::Parse { path, error } => {
                write!(f, "Failed to parse '{}': {}", path, error)
            }
            CliError::Document(e) => write!(f, "{}", e),
            CliError::UnknownLayer(name) => write!(f, "Unknown layer '{}'", name),
            CliError::History(e) => write!(f, "History query failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::Parse { error, .. } => Some(error),
            CliError::Document(e) => Some(e),
            CliError::History(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<DocumentError> for CliError {
    fn from(e: DocumentError) -> Self {
        CliError::Document(e)
    }
}

impl From<HistoryError> for CliError {
    fn from(e: HistoryError) -> Self {
        CliError::History(e)
    }
}
