//! Application configuration.
//!
//! Settings are read from `~/.prefmap/config.ini`. A missing file yields the
//! defaults; a present file is overlaid section by section.
//!
//! ```ini
//! [maps]
//! directory = ~/prefmap/maps
//! regions_file = ~/prefmap/regions.ini
//!
//! [detection]
//! tie_break = lowest-code
//! ```
//!
//! Settings structs live in `settings`, constants in `defaults`, parsing
//! in `parser`, and serialization in `writer`.

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    DEFAULT_LOG_FILE, DEFAULT_MAPS_DIRECTORY, DEFAULT_RESOLVER_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DetectionSettings, LoggingSettings, MapsSettings, ResolverSettings,
};
