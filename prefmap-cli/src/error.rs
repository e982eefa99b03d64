//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use prefmap::config::ConfigFileError;
use prefmap::detect::DetectionError;
use prefmap::link::LinkError;
use prefmap::preview::PreviewError;
use prefmap::service::ServiceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Arguments that clap cannot reject on its own
    Usage(String),
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or is invalid
    Config(ConfigFileError),
    /// Region table or shape assets could not be loaded
    ServiceCreation(ServiceError),
    /// Map link could not be turned into a coordinate
    Location(LinkError),
    /// A detection, projection or rendering request failed
    Request(ServiceError),
    /// Failed to write an output file
    FileWrite {
        path: PathBuf,
        error: std::io::Error,
    },
    /// Failed to write a preview image
    Preview(PreviewError),
    /// Failed to serialize JSON output
    Json(serde_json::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Check the configuration file; 'prefmap config path' shows its location");
                eprintln!("and 'prefmap config show' prints the settings in effect.");
            }
            CliError::ServiceCreation(_) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. [maps] directory does not contain the region SVG files");
                eprintln!("  2. [maps] regions_file points to a missing or malformed table");
                eprintln!("  3. A region's width/height does not match its SVG size");
            }
            CliError::Request(ServiceError::Detection(DetectionError::NoCandidate { .. })) => {
                eprintln!();
                eprintln!("Use 'prefmap regions' to list the configured regions and their bounds.");
            }
            CliError::Location(LinkError::Http { .. }) => {
                eprintln!();
                eprintln!("Short links are expanded over the network. Pass --lat/--lng,");
                eprintln!("or a full map link containing '?q=LAT,LNG' or '/@LAT,LNG'.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::ServiceCreation(e) => write!(f, "Failed to load regions: {}", e),
            CliError::Location(e) => write!(f, "{}", e),
            CliError::Request(e) => write!(f, "{}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
            CliError::Preview(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "Failed to serialize output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::ServiceCreation(e) => Some(e),
            CliError::Location(e) => Some(e),
            CliError::Request(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Preview(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Usage(_) | CliError::LoggingInit(_) => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<LinkError> for CliError {
    fn from(e: LinkError) -> Self {
        CliError::Location(e)
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Request(e)
    }
}

impl From<PreviewError> for CliError {
    fn from(e: PreviewError) -> Self {
        CliError::Preview(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}
