//! Config command implementation
//!
//! Handles the `limit-pack config` command: loads the project's checks,
//! synthesizes a bundler configuration for each one concurrently and writes
//! it to the check's scratch directory.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::config::{Check, ConfigLoader, RunConfig};
use crate::fmt::{icon, CHECKMARK, CROSSMARK, ROCKET};
use crate::webpack::{get_config, CompiledConfig};

/// Scratch directory used when `--out-dir` is not given, relative to the project
pub const DEFAULT_OUT_DIR: &str = ".limit-pack";

/// File each check's configuration is written to inside its scratch directory
pub const CONFIG_OUTPUT_FILE: &str = "webpack.config.json";

/// Options of the `config` command
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    /// Project root; the process working directory when absent
    pub cwd: Option<PathBuf>,
    /// Scratch root; `<project>/.limit-pack` when absent
    pub out_dir: Option<PathBuf>,
    /// Interactive size-explanation mode
    pub why: bool,
    /// Persist bundle stats
    pub save_bundle: bool,
    /// Running under a test environment
    pub test_environment: bool,
    /// Print a JSON report instead of the summary
    pub json: bool,
}

/// Generated configuration of one check
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedConfig {
    /// Check name
    pub name: String,
    /// Position of the check in the run
    pub index: usize,
    /// Where the configuration was written
    pub config_path: PathBuf,
    /// The configuration itself
    pub config: CompiledConfig,
}

/// Generate bundler configurations for every configured check
///
/// Every check runs in its own task with its own scratch directory
/// (`<out-dir>/<index>`), so synthesized entries never collide. Every failing
/// check is listed; the first one (in run order) becomes the command's error
/// and its message is left to the caller, so it is printed once.
///
/// # Examples
///
/// ```no_run
/// use limit_pack::cmd::config::{cmd_config, ConfigOptions};
///
/// # async fn run() -> anyhow::Result<()> {
/// cmd_config(ConfigOptions {
///     why: true,
///     ..Default::default()
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn cmd_config(options: ConfigOptions) -> Result<()> {
    let project_root = match &options.cwd {
        Some(cwd) => cwd.clone(),
        None => env::current_dir().context("Failed to read current directory")?,
    };

    let config = ConfigLoader::load(&project_root)?;
    if config.checks.is_empty() {
        anyhow::bail!("No checks configured in {}", project_root.display());
    }

    let mut run = RunConfig::new(&project_root)
        .with_why(options.why)
        .with_save_bundle(options.save_bundle)
        .with_test_environment(options.test_environment);
    if let Some(project) = config.project {
        run = run.with_project(project);
    }

    let out_dir = options
        .out_dir
        .clone()
        .unwrap_or_else(|| project_root.join(DEFAULT_OUT_DIR));

    if !options.json {
        println!(
            "{} {} Generating {} config(s)",
            icon(ROCKET),
            style("limit-pack").bold(),
            config.checks.len()
        );
        println!();
    }

    let results = generate_all(Arc::new(run), config.checks, &out_dir).await?;

    let mut generated = Vec::new();
    let mut first_error = None;
    for (name, result) in results {
        match result {
            Ok(config) => {
                if !options.json {
                    println!(
                        "   {} {} {} {}",
                        icon(CHECKMARK),
                        style(&name).bold(),
                        style("→").dim(),
                        config.config_path.display()
                    );
                }
                generated.push(config);
            }
            // The first failure is returned and printed by the caller
            Err(err) if first_error.is_none() => {
                eprintln!("   {} {}", icon(CROSSMARK), style(&name).bold());
                first_error = Some(err);
            }
            Err(err) => {
                eprintln!("   {} {}: {:#}", icon(CROSSMARK), style(&name).bold(), err);
            }
        }
    }

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&generated).context("Failed to serialize report")?
        );
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Run `get_config` for every check concurrently, returning results in run order
pub async fn generate_all(
    run: Arc<RunConfig>,
    checks: Vec<Check>,
    out_dir: &Path,
) -> Result<Vec<(String, Result<GeneratedConfig>)>> {
    let mut join_set = JoinSet::new();

    for (index, check) in checks.into_iter().enumerate() {
        let run = Arc::clone(&run);
        let scratch = out_dir.join(index.to_string());

        join_set.spawn(async move {
            let name = check.name.clone();
            let result = generate_one(&run, check, index, &scratch).await;
            (index, name, result)
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = join_set.join_next().await {
        results.push(joined.context("Config generation task panicked")?);
    }

    results.sort_by_key(|(index, _, _)| *index);
    Ok(results
        .into_iter()
        .map(|(_, name, result)| (name, result))
        .collect())
}

async fn generate_one(
    run: &RunConfig,
    mut check: Check,
    index: usize,
    scratch: &Path,
) -> Result<GeneratedConfig> {
    let config = get_config(run, &mut check, index, scratch).await?;

    tokio::fs::create_dir_all(scratch)
        .await
        .with_context(|| format!("Failed to create {}", scratch.display()))?;

    let config_path = scratch.join(CONFIG_OUTPUT_FILE);
    let contents = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    tokio::fs::write(&config_path, contents)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(GeneratedConfig {
        name: check.name,
        index,
        config_path,
        config,
    })
}
