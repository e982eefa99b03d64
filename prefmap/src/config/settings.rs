//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::detect::TieBreak;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Region assets and table
    pub maps: MapsSettings,
    /// Detection behavior
    pub detection: DetectionSettings,
    /// Map link expansion
    pub resolver: ResolverSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Where region data comes from.
#[derive(Debug, Clone, PartialEq)]
pub struct MapsSettings {
    /// Directory containing the SVG files named by the region table
    pub directory: PathBuf,
    /// INI region table; the built-in table is used when unset
    pub regions_file: Option<PathBuf>,
}

/// Detection configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSettings {
    /// Order in which overlapping candidates are tested
    pub tie_break: TieBreak,
}

/// Map link resolver configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverSettings {
    /// Timeout in seconds for redirect expansion
    pub timeout: u64,
    /// User agent sent with expansion requests
    pub user_agent: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory the log file is written to
    pub directory: PathBuf,
    /// Log file name
    pub file: String,
}

impl LoggingSettings {
    /// Full path of the log file.
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file)
    }
}
