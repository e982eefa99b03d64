//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`detect`] - Detect the region containing a point
//! - [`marker`] - Write a region SVG with a location marker
//! - [`preview`] - Render the detected region as PNG
//! - [`project`] - Project a point onto one region's canvas
//! - [`regions`] - List configured regions

pub mod common;
pub mod config;
pub mod detect;
pub mod marker;
pub mod preview;
pub mod project;
pub mod regions;
