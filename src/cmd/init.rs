//! Init command implementation
//!
//! Handles the `limit-pack init` command which writes a starter
//! `.size-limit.toml` with a single check.

use anyhow::Result;
use console::style;
use std::path::Path;

use crate::config::{self, Check, ConfigFile, RunConfig};
use crate::fmt::{icon, CHECKMARK, INFO, ROCKET, WARNING};

/// Entry file the starter check measures
pub const STARTER_PATH: &str = "index.js";

/// Starter configuration for a project directory
pub fn starter_config(project_root: &Path) -> ConfigFile {
    let run = RunConfig::new(project_root);
    ConfigFile {
        project: Some(run.project),
        checks: vec![Check::new(STARTER_PATH).with_path(STARTER_PATH)],
    }
}

/// Initialize a size check configuration in `project_root`
///
/// Leaves an existing `.size-limit.toml` or `.size-limit.json` untouched.
///
/// # Examples
///
/// ```no_run
/// use limit_pack::cmd::init::cmd_init;
/// use std::path::Path;
///
/// cmd_init(Path::new("."))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_init(project_root: &Path) -> Result<()> {
    println!(
        "{} {} Initializing size checks",
        icon(ROCKET),
        style("limit-pack init").bold()
    );
    println!();

    if let Some(existing) = config::ConfigLoader::find(project_root) {
        println!(
            "{} Config file already exists: {}",
            icon(WARNING),
            style(existing.display()).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(());
    }

    let starter = starter_config(project_root);
    config::ConfigLoader::save(&starter, project_root)?;

    println!(
        "{} Created {}",
        icon(CHECKMARK),
        style(config::CONFIG_FILE_NAME).cyan().bold()
    );
    println!();
    println!("{}  Next Steps:", icon(INFO));
    println!(
        "   1. Point `path` at your built bundle, or use `import` to measure named exports"
    );
    println!(
        "   2. Run {} to generate bundler configs",
        style("limit-pack config").cyan()
    );

    Ok(())
}
