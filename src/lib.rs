#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! limit-pack library
//!
//! Synthesizes bundler configurations for bundle size checks. A check names
//! the files (or the named imports) whose packaged size must be measured;
//! this crate validates its inputs, writes a synthetic entry for import
//! checks, and assembles the configuration the bundling engine runs.
//!
//! # Basic Example
//!
//! Describing a check and a run:
//!
//! ```
//! use limit_pack::config::{Check, RunConfig};
//!
//! let run = RunConfig::new("/work/my-lib").with_save_bundle(true);
//! let check = Check::new("core")
//!     .with_path("dist/index.js")
//!     .with_ignore(["react"]);
//!
//! assert_eq!(run.project, "my-lib");
//! assert_eq!(check.ignore_entries().count(), 1);
//! ```
//!
//! # Advanced Example: Externals
//!
//! Ignored modules become externals through one anchored pattern:
//!
//! ```
//! use limit_pack::webpack::Externals;
//!
//! let externals = Externals::compile("core", ["react", "lodash/fp"])?
//!     .expect("non-empty ignore list");
//!
//! assert!(externals.is_external("react"));
//! assert!(externals.is_external("react/jsx-runtime"));
//! assert!(!externals.is_external("react-dom"));
//! assert!(externals.is_external("lodash/fp/map"));
//! assert!(!externals.is_external("lodash"));
//! # Ok::<(), limit_pack::error::LimitError>(())
//! ```
//!
//! # Advanced Example: Generating a Config
//!
//! ```no_run
//! use limit_pack::config::{Check, RunConfig};
//! use limit_pack::webpack::get_config;
//! use std::path::Path;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let run = RunConfig::from_current_dir()?.with_why(true);
//! let mut check = Check::new("debounce").with_import("lodash", "{ debounce }");
//!
//! let config = get_config(&run, &mut check, 0, Path::new("/tmp/limit-pack/0")).await?;
//! println!("{}", serde_json::to_string_pretty(&config)?);
//! # Ok(())
//! # }
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file and check management
pub mod config;
/// Error types with contextual suggestions
pub mod error;
/// Shared console output helpers
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Bundler configuration synthesis
pub mod webpack;
