//! Common test utilities and helpers
//!
//! Shared functionality for integration tests:
//! - Fixture projects with built files and a size check config
//! - Helpers for reading generated configs back as JSON

pub mod fixtures;

/// Read a generated config file back as JSON
#[allow(dead_code)]
pub fn read_json(path: &std::path::Path) -> anyhow::Result<serde_json::Value> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
