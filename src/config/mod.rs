//! Project configuration for size checks
//!
//! This module provides:
//! - `.size-limit.toml` / `.size-limit.json` file support
//! - The `Check` description of one measurement
//! - Run-wide settings (`RunConfig`)

pub mod file;
pub mod loader;

pub use file::{Check, ConfigFile, RunConfig, CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
