//! Bundler configuration synthesis
//!
//! Turns one check into the configuration the bundling engine runs:
//! 1. validate that every input file exists
//! 2. synthesize an entry module for import checks
//! 3. assemble entry, output, loader rules and optimization flags
//! 4. compile the ignore list into an externals predicate
//! 5. attach the bundle-analyzer plugin, if requested

pub mod assembler;
pub mod entry;
pub mod externals;
pub mod instrumentation;
pub mod schema;
pub mod validator;

pub use externals::{ExternalDecision, Externals, EXTERNAL_GLOBAL};
pub use instrumentation::{Instrumentation, ANALYZER_BASE_PORT};
pub use schema::{AnalyzerMode, AnalyzerOptions, CompiledConfig, Plugin, SizeMetric};

use std::path::Path;

use crate::config::{Check, RunConfig};
use crate::error::LimitError;

/// Produce the bundler configuration for one check
///
/// `check_index` is the check's zero-based position in the run; it fixes the
/// analyzer port, so it must stay stable however checks are scheduled.
/// `output` is the check's scratch directory. Import checks write their
/// synthetic entry there and get `check.files` replaced by its path.
///
/// # Examples
///
/// ```no_run
/// use limit_pack::config::{Check, RunConfig};
/// use limit_pack::webpack::get_config;
/// use std::path::Path;
///
/// # async fn run() -> Result<(), limit_pack::error::LimitError> {
/// let run = RunConfig::new("/work/my-lib");
/// let mut check = Check::new("debounce").with_import("lodash", "{ debounce }");
///
/// let config = get_config(&run, &mut check, 0, Path::new("/tmp/limit/0")).await?;
/// assert_eq!(config.entry_files(), check.files.as_slice());
/// # Ok(())
/// # }
/// ```
pub async fn get_config(
    run: &RunConfig,
    check: &mut Check,
    check_index: usize,
    output: &Path,
) -> Result<CompiledConfig, LimitError> {
    let candidates = validator::validate_check(run, check)?;

    let entry_files = match entry::synthesize_entry(check, output).await? {
        Some(entry) => vec![entry],
        None => candidates,
    };

    let mut config = assembler::assemble(run, check, entry_files, output);
    config.externals = Externals::compile(&check.name, check.ignore_entries())?;
    instrumentation::attach_instrumentation(&mut config.plugins, run, check, check_index)?;

    Ok(config)
}
