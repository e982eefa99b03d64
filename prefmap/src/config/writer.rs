//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let regions_file = config
        .maps
        .regions_file
        .as_ref()
        .map(|p| path_to_string(p))
        .unwrap_or_default();

    format!(
        r#"[maps]
; Directory containing the region SVG files
directory = {}
; Region table (INI, one section per region). Leave empty for the built-in table.
; Example section:
;   [aomori]
;   name = Aomori
;   code = 2
;   min_lat = 40.2
;   max_lat = 41.6
;   min_lng = 139.5
;   max_lng = 141.6
;   svg_file = aomori.svg
;   width = 2107
;   height = 2044
regions_file = {}

[detection]
; Order in which overlapping regions are tested (first match wins):
;   lowest-code  - ascending region code (default)
;   highest-code - descending region code
tie_break = {}

[resolver]
; Timeout in seconds when expanding shortened map links
timeout = {}
; User agent sent when expanding map links
user_agent = {}

[logging]
; Directory for the log file (cleared at the start of each run)
directory = {}
file = {}
"#,
        path_to_string(&config.maps.directory),
        regions_file,
        config.detection.tie_break,
        config.resolver.timeout,
        config.resolver.user_agent,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Convert path to string, collapsing home dir to ~.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
