//! Integration tests for the prefmap binary.
//!
//! Each test writes a config file into a temporary directory that points the
//! maps directory at the bundled outlines and keeps the log file inside the
//! temporary directory, then runs the CLI with `--config`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

fn bundled_maps() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("maps")
}

/// Write a config file using the bundled maps and return its path.
fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("config.ini");
    fs::write(
        &path,
        format!(
            "[maps]\ndirectory = {}\n\n[logging]\ndirectory = {}\n",
            bundled_maps().display(),
            dir.join("logs").display()
        ),
    )
    .unwrap();
    path
}

fn run_cli(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_prefmap"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run prefmap")
}

fn assert_success(output: &Output) -> String {
    assert!(
        output.status.success(),
        "Command failed:\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_failure(output: &Output) -> String {
    assert!(
        !output.status.success(),
        "Command unexpectedly succeeded:\n{}",
        String::from_utf8_lossy(&output.stdout)
    );
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Detection
// =============================================================================

#[test]
fn test_detect_prints_region() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stdout = assert_success(&run_cli(
        &config,
        &["detect", "--lat", "40.6031", "--lng", "140.4641"],
    ));
    assert!(stdout.contains("青森県 (aomori)"), "{}", stdout);
    assert!(stdout.contains("aomori accepted (inside-shape)"), "{}", stdout);
}

#[test]
fn test_detect_json() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stdout = assert_success(&run_cli(
        &config,
        &["detect", "--lat", "40.51", "--lng", "141.49", "--json"],
    ));
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["region_id"], "aomori");
    assert_eq!(json["point"]["lat"], 40.51);
    assert_eq!(json["candidate_trace"][0]["included"], true);
}

#[test]
fn test_detect_from_full_map_link() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stdout = assert_success(&run_cli(
        &config,
        &[
            "detect",
            "--url",
            "https://www.google.com/maps/@41.29,141.18,12z",
            "--json",
        ],
    ));
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["region_id"], "aomori");
}

#[test]
fn test_detect_outside_every_region() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stderr = assert_failure(&run_cli(
        &config,
        &["detect", "--lat", "35.6812", "--lng", "139.7671"],
    ));
    assert!(stderr.contains("not in any known region"), "{}", stderr);
    assert!(stderr.contains("prefmap regions"), "{}", stderr);
}

#[test]
fn test_detect_in_bay_reports_trace() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stderr = assert_failure(&run_cli(
        &config,
        &["detect", "--lat", "41.05", "--lng", "141.0"],
    ));
    assert!(stderr.contains("aomori rejected (outside-shape)"), "{}", stderr);
}

#[test]
fn test_detect_json_failure_prints_trace() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let output = run_cli(
        &config,
        &["detect", "--lat", "41.05", "--lng", "141.0", "--json"],
    );
    assert_failure(&output);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["point"]["lat"], 41.05);
    assert_eq!(json["candidate_trace"][0]["region_id"], "aomori");
    assert_eq!(json["candidate_trace"][0]["included"], false);
    assert_eq!(json["candidate_trace"][0]["reason"], "outside-shape");
}

#[test]
fn test_missing_maps_directory_fails_with_hint() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.ini");
    fs::write(
        &config,
        format!(
            "[maps]\ndirectory = {}\n\n[logging]\ndirectory = {}\n",
            temp_dir.path().join("nowhere").display(),
            temp_dir.path().join("logs").display()
        ),
    )
    .unwrap();

    let stderr = assert_failure(&run_cli(&config, &["regions"]));
    assert!(stderr.contains("Failed to load regions"), "{}", stderr);
    assert!(stderr.contains("Common issues"), "{}", stderr);
}

// =============================================================================
// Projection and rendering
// =============================================================================

#[test]
fn test_project_json() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stdout = assert_success(&run_cli(
        &config,
        &[
            "project", "--region", "aomori", "--lat", "40.9", "--lng", "140.55", "--json",
        ],
    ));
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["region_id"], "aomori");
    assert_eq!(json["canvas_width"], 2107);
    assert!((json["raster"]["x"].as_f64().unwrap() - 1053.5).abs() < 1e-6);
}

#[test]
fn test_project_unknown_region() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stderr = assert_failure(&run_cli(
        &config,
        &["project", "--region", "tokyo", "--lat", "40.9", "--lng", "140.55"],
    ));
    assert!(stderr.contains("tokyo"), "{}", stderr);
}

#[test]
fn test_marker_writes_svg() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let output = temp_dir.path().join("out").join("marker.svg");

    assert_success(&run_cli(
        &config,
        &[
            "marker",
            "--region",
            "aomori",
            "--lat",
            "40.6031",
            "--lng",
            "140.4641",
            "--output",
            output.to_str().unwrap(),
        ],
    ));

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains(r#"class="marker""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_preview_writes_png() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let output = temp_dir.path().join("preview.png");

    let stdout = assert_success(&run_cli(
        &config,
        &[
            "preview",
            "--lat",
            "40.6031",
            "--lng",
            "140.4641",
            "-o",
            output.to_str().unwrap(),
        ],
    ));
    assert!(stdout.contains("2107x2044 preview of aomori"), "{}", stdout);

    let bytes = fs::read(&output).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

// =============================================================================
// Regions and configuration
// =============================================================================

#[test]
fn test_regions_lists_builtin_table() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stdout = assert_success(&run_cli(&config, &["regions"]));
    assert!(stdout.contains("aomori"), "{}", stdout);
    assert!(stdout.contains("2107x2044"), "{}", stdout);
    assert!(stdout.contains("lowest-code"), "{}", stdout);

    let stdout = assert_success(&run_cli(&config, &["regions", "--json"]));
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json[0]["id"], "aomori");
    assert_eq!(json[0]["order_code"], 2);
}

#[test]
fn test_log_file_written_to_configured_directory() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    assert_success(&run_cli(&config, &["regions"]));
    assert!(temp_dir.path().join("logs").join("prefmap.log").exists());
}

#[test]
fn test_config_path_and_show() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let stdout = assert_success(&run_cli(&config, &["config", "path"]));
    assert_eq!(stdout.trim(), config.display().to_string());

    let stdout = assert_success(&run_cli(&config, &["config", "show"]));
    assert!(stdout.contains("[detection]"), "{}", stdout);
    assert!(stdout.contains("tie_break = lowest-code"), "{}", stdout);
}

#[test]
fn test_config_init_refuses_overwrite() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("nested").join("config.ini");

    assert_success(&run_cli(&config, &["config", "init"]));
    assert!(config.exists());

    let stderr = assert_failure(&run_cli(&config, &["config", "init"]));
    assert!(stderr.contains("--force"), "{}", stderr);

    assert_success(&run_cli(&config, &["config", "init", "--force"]));
}

#[test]
fn test_invalid_config_value_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.ini");
    fs::write(&config, "[resolver]\ntimeout = 0\n").unwrap();

    let stderr = assert_failure(&run_cli(&config, &["regions"]));
    assert!(stderr.contains("Configuration error"), "{}", stderr);
}
