//! Bundle-analyzer instrumentation
//!
//! At most one analyzer plugin per check: the interactive `why` mode wins
//! over stats snapshots when both are requested.

use crate::config::{Check, RunConfig};
use crate::error::LimitError;

use super::schema::{AnalyzerMode, AnalyzerOptions, Plugin, SizeMetric};

/// Port of the first check's analyzer; later checks count up from it
pub const ANALYZER_BASE_PORT: u16 = 8888;

/// Which analyzer, if any, a check gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrumentation {
    /// No analyzer
    None,
    /// Interactive size explanation on the given port
    Why {
        /// Viewer port
        port: u16,
    },
    /// Silent stats file for later aggregation
    SaveBundle,
}

impl Instrumentation {
    /// Pick the instrumentation for the check at `check_index` in the run
    pub fn select(run: &RunConfig, check: &Check, check_index: usize) -> Result<Self, LimitError> {
        if run.why {
            let port = u16::try_from(check_index)
                .ok()
                .and_then(|offset| ANALYZER_BASE_PORT.checked_add(offset))
                .ok_or_else(|| LimitError::PortOutOfRange {
                    check: check.name.clone(),
                    index: check_index,
                })?;
            Ok(Self::Why { port })
        } else if run.save_bundle {
            Ok(Self::SaveBundle)
        } else {
            Ok(Self::None)
        }
    }

    /// Analyzer plugin for this mode
    ///
    /// Under a test environment the interactive mode writes a static report
    /// instead of opening a viewer.
    pub fn plugin(self, run: &RunConfig, check: &Check) -> Option<Plugin> {
        let options = match self {
            Self::None => return None,
            Self::Why { port } => AnalyzerOptions {
                open_analyzer: !run.test_environment,
                analyzer_mode: if run.test_environment {
                    AnalyzerMode::Static
                } else {
                    AnalyzerMode::Server
                },
                default_sizes: Some(if check.gzip_enabled() {
                    SizeMetric::Gzip
                } else {
                    SizeMetric::Parsed
                }),
                analyzer_port: Some(port),
                generate_stats_file: false,
            },
            Self::SaveBundle => AnalyzerOptions {
                open_analyzer: false,
                analyzer_mode: AnalyzerMode::Disabled,
                default_sizes: None,
                analyzer_port: None,
                generate_stats_file: true,
            },
        };
        Some(Plugin::BundleAnalyzer(options))
    }
}

/// Append the check's analyzer plugin, if any, to `plugins`
pub fn attach_instrumentation(
    plugins: &mut Vec<Plugin>,
    run: &RunConfig,
    check: &Check,
    check_index: usize,
) -> Result<Instrumentation, LimitError> {
    let instrumentation = Instrumentation::select(run, check, check_index)?;
    log::debug!("check '{}': instrumentation {:?}", check.name, instrumentation);
    plugins.extend(instrumentation.plugin(run, check));
    Ok(instrumentation)
}
