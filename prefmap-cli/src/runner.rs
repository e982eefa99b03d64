//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, service creation, and
//! file output to reduce duplication across command handlers.

use std::path::{Path, PathBuf};

use prefmap::config::{config_file_path, ConfigFile};
use prefmap::logging::{init_logging, LoggingGuard};
use prefmap::service::PrefmapService;
use tracing::info;

use crate::error::CliError;

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Force debug-level logging
    pub debug: bool,
    /// Config file overriding ~/.prefmap/config.ini
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Config file in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_file_path)
    }

    /// Load the config file in effect, falling back to defaults when absent.
    pub fn load_config(&self) -> Result<ConfigFile, CliError> {
        Ok(ConfigFile::load_from(&self.config_path())?)
    }
}

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// Log events always go to the configured log file. They are mirrored to
    /// stderr with `--debug` or when `RUST_LOG` is set; stdout carries only
    /// command output.
    pub fn new(options: &GlobalOptions) -> Result<Self, CliError> {
        let config = options.load_config()?;

        let console = options.debug || std::env::var_os("RUST_LOG").is_some();
        let logging_guard = init_logging(
            &config.logging.directory,
            &config.logging.file,
            options.debug,
            console,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("prefmap v{}", prefmap::VERSION);
        info!(
            command,
            maps = %self.config.maps.directory.display(),
            "prefmap CLI started"
        );
    }

    /// Create the service described by the loaded configuration.
    pub fn create_service(&self) -> Result<PrefmapService, CliError> {
        PrefmapService::from_config(&self.config)
            .map_err(CliError::ServiceCreation)
            .inspect(|service| info!(regions = service.regions().len(), "Service created"))
    }

    /// Write text output to a file, creating parent directories.
    pub fn write_file(&self, path: &Path, contents: &str) -> Result<(), CliError> {
        let file_write = |error| CliError::FileWrite {
            path: path.to_path_buf(),
            error,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(file_write)?;
        }
        std::fs::write(path, contents).map_err(file_write)?;

        info!(path = %path.display(), bytes = contents.len(), "Wrote output file");
        Ok(())
    }
}
