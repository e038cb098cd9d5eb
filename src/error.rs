//! Error types with contextual suggestions
//!
//! Every failure of the config pipeline names the check it belongs to, so a
//! run with many checks can point at the offending one. Errors carry:
//! - An actionable message
//! - A suggested fix
//! - An exit code following sysexits.h conventions
//!
//! # Examples
//!
//! ```
//! use limit_pack::error::LimitError;
//!
//! let err = LimitError::NoFileToCheck {
//!     check: "core".to_string(),
//! };
//! assert_eq!(
//!     err.to_string(),
//!     "Could not test 'core' because it includes no file to check"
//! );
//! assert_eq!(err.check_name(), "core");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a check into a bundler configuration
#[derive(Error, Debug)]
pub enum LimitError {
    /// A file the check needs does not exist on disk
    #[error("Could not test '{check}' because file '{}' is missing", path.display())]
    MissingFile {
        /// Check name
        check: String,
        /// Path that was not found
        path: PathBuf,
    },

    /// The ignore list removed every candidate file
    #[error("Could not test '{check}' because it includes no file to check")]
    NoFileToCheck {
        /// Check name
        check: String,
    },

    /// Creating the scratch directory or writing the synthesized entry failed
    #[error("Could not write entry for '{check}' to '{}'", path.display())]
    EntryWrite {
        /// Check name
        check: String,
        /// Path being created or written
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// The ignore list could not be compiled into an externals pattern
    #[error("Could not test '{check}' because its ignore list does not compile")]
    IgnorePattern {
        /// Check name
        check: String,
        #[source]
        /// Regex compilation error
        source: regex::Error,
    },

    /// The analyzer port for this check does not fit in a u16
    #[error("Could not test '{check}' because analyzer port for index {index} is out of range")]
    PortOutOfRange {
        /// Check name
        check: String,
        /// Zero-based position of the check in the run
        index: usize,
    },
}

impl LimitError {
    /// Name of the check this error belongs to
    pub fn check_name(&self) -> &str {
        match self {
            Self::MissingFile { check, .. }
            | Self::NoFileToCheck { check }
            | Self::EntryWrite { check, .. }
            | Self::IgnorePattern { check, .. }
            | Self::PortOutOfRange { check, .. } => check,
        }
    }

    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use limit_pack::error::LimitError;
    /// use std::path::PathBuf;
    ///
    /// let error = LimitError::MissingFile {
    ///     check: "core".to_string(),
    ///     path: PathBuf::from("/project/dist/index.js"),
    /// };
    ///
    /// let suggestion = error.suggestion().unwrap();
    /// assert!(suggestion.contains("dist/index.js"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::MissingFile { path, .. } => Some(format!(
                "Build the project first or fix the path: {}",
                path.display()
            )),
            Self::NoFileToCheck { .. } => Some(
                "Remove the check's own files from `ignore`, or add a `path` that is not ignored"
                    .to_string(),
            ),
            Self::EntryWrite { path, .. } => Some(format!(
                "Check file permissions and free space for {}",
                path.display()
            )),
            Self::IgnorePattern { .. } => Some(
                "Shorten the ignore list, e.g. ignore package roots instead of subpaths"
                    .to_string(),
            ),
            Self::PortOutOfRange { .. } => {
                Some("Split the run into fewer checks when using --why".to_string())
            }
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes following sysexits.h conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingFile { .. } => 66,    // EX_NOINPUT
            Self::NoFileToCheck { .. } => 65,  // EX_DATAERR
            Self::EntryWrite { .. } => 74,     // EX_IOERR
            Self::IgnorePattern { .. } => 65,  // EX_DATAERR
            Self::PortOutOfRange { .. } => 64, // EX_USAGE
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and a suggestion when one is known
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(limit_error) = error.downcast_ref::<LimitError>() {
            if let Some(suggestion) = limit_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(limit_error) = error.downcast_ref::<LimitError>() {
            limit_error.exit_code()
        } else {
            1
        }
    }
}
