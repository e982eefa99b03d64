//! Default values for configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::detect::TieBreak;

/// Directory holding region SVG assets, relative to the working directory.
pub const DEFAULT_MAPS_DIRECTORY: &str = "maps";

/// Timeout for expanding shortened map links (seconds).
pub const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 10;

/// User agent sent when expanding map links.
pub const DEFAULT_USER_AGENT: &str = concat!("prefmap/", env!("CARGO_PKG_VERSION"));

/// Log file name inside the log directory.
pub const DEFAULT_LOG_FILE: &str = "prefmap.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            maps: MapsSettings {
                directory: PathBuf::from(DEFAULT_MAPS_DIRECTORY),
                regions_file: None,
            },
            detection: DetectionSettings {
                tie_break: TieBreak::default(),
            },
            resolver: ResolverSettings {
                timeout: DEFAULT_RESOLVER_TIMEOUT_SECS,
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            logging: LoggingSettings {
                directory: config_directory().join("logs"),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
