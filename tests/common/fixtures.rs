//! Test fixture helpers for creating test projects
//!
//! Provides utilities for setting up projects with built bundle files and a
//! `.size-limit.toml` describing checks over them.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Creates a project with `dist/index.js` and `dist/styles.css`
///
/// # Returns
///
/// A tuple of (TempDir, PathBuf to dist/index.js) - the TempDir must be kept alive
pub fn create_built_project() -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let dist = temp_dir.path().join("dist");
    fs::create_dir_all(&dist)?;

    let index = dist.join("index.js");
    fs::write(
        &index,
        r#"import "./styles.css"
export function add(a, b) {
  return a + b
}
"#,
    )?;
    fs::write(dist.join("styles.css"), ".root { color: red }\n")?;

    Ok((temp_dir, index))
}

/// Writes `.size-limit.toml` into `project_root`
pub fn write_config(project_root: &Path, contents: &str) -> anyhow::Result<PathBuf> {
    let path = project_root.join(".size-limit.toml");
    fs::write(&path, contents)?;
    Ok(path)
}

/// Creates a built project with a config holding a path check that ignores a
/// dependency, an import check and a check without concatenation
pub fn create_project_with_checks() -> anyhow::Result<TempDir> {
    let (temp_dir, _) = create_built_project()?;
    write_config(
        temp_dir.path(),
        r#"
project = "widgets"

[[check]]
name = "core"
path = "dist/index.js"
ignore = ["react"]

[[check]]
name = "debounce"
import = { "lodash" = "{ debounce }" }
gzip = false

[[check]]
name = "unconcatenated"
path = "dist/index.js"
disable-module-concatenation = true
"#,
    )?;
    Ok(temp_dir)
}
