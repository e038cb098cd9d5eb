//! Configuration data structures
//!
//! [`ConfigFile`] is what lives on disk; [`RunConfig`] is the per-run settings
//! the CLI assembles around it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// TOML configuration file name
pub const CONFIG_FILE_NAME: &str = ".size-limit.toml";

/// JSON configuration file name, checked when no TOML file exists
pub const JSON_CONFIG_FILE_NAME: &str = ".size-limit.json";

/// Project name used when none is configured and the directory has no name
pub const DEFAULT_PROJECT: &str = "index";

/// Size check configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Project name, used for the output bundle name in `why` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Checks to measure, in run order
    #[serde(rename = "check", default)]
    pub checks: Vec<Check>,
}

impl ConfigFile {
    /// Give every unnamed check a name derived from its inputs
    ///
    /// Errors name the check they belong to, so an empty name would make
    /// them useless in a multi-check run.
    pub fn fill_check_names(&mut self) {
        for (index, check) in self.checks.iter_mut().enumerate() {
            if !check.name.is_empty() {
                continue;
            }
            check.name = match (&check.path, check.files.first()) {
                (Some(path), _) => path.display().to_string(),
                (None, Some(file)) => file.display().to_string(),
                (None, None) => format!("check #{}", index + 1),
            };
        }
    }
}

/// One unit of measurement
///
/// # Examples
///
/// ```
/// use limit_pack::config::Check;
///
/// let check = Check::new("lodash")
///     .with_import("lodash", "{ debounce }")
///     .with_ignore(["react"]);
///
/// assert_eq!(check.name, "lodash");
/// assert!(check.has_imports());
/// assert_eq!(check.ignore_entries().collect::<Vec<_>>(), vec!["react"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Check {
    /// Name used in error messages
    #[serde(default)]
    pub name: String,

    /// Files to bundle; a single string is accepted and normalized to a list
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub files: Vec<PathBuf>,

    /// Single path resolved against the run's working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Module specifier to import-binding text, e.g. `"lodash" = "{ debounce }"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<BTreeMap<String, String>>,

    /// Module specifiers excluded from the bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<Vec<String>>,

    /// Turn off cross-module concatenation
    #[serde(default, alias = "disableModuleConcatenation")]
    pub disable_module_concatenation: bool,

    /// Report gzip size (`None` means the default, gzip on)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gzip: Option<bool>,
}

impl Check {
    /// Create an empty check with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the single path
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Replace the file list
    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Add an import binding for a module specifier
    pub fn with_import(mut self, specifier: impl Into<String>, binding: impl Into<String>) -> Self {
        self.import
            .get_or_insert_with(BTreeMap::new)
            .insert(specifier.into(), binding.into());
        self
    }

    /// Replace the ignore list
    pub fn with_ignore<I, S>(mut self, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = Some(ignore.into_iter().map(Into::into).collect());
        self
    }

    /// Whether the check measures named imports instead of files
    pub fn has_imports(&self) -> bool {
        self.import.as_ref().is_some_and(|i| !i.is_empty())
    }

    /// Non-empty ignore entries, in declaration order
    pub fn ignore_entries(&self) -> impl Iterator<Item = &str> {
        self.ignore
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|entry| !entry.is_empty())
    }

    /// Whether sizes are reported gzip-compressed
    pub fn gzip_enabled(&self) -> bool {
        self.gzip != Some(false)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(PathBuf),
    Many(Vec<PathBuf>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(path) => vec![path],
        OneOrMany::Many(paths) => paths,
    })
}

/// Process-wide settings for one run
///
/// The test-environment flag is an explicit input; reading the process
/// environment is left to the caller.
///
/// # Examples
///
/// ```
/// use limit_pack::config::RunConfig;
///
/// let run = RunConfig::new("/work/my-lib").with_why(true);
/// assert_eq!(run.project, "my-lib");
/// assert!(run.why);
/// assert!(!run.save_bundle);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Directory `path` and `ignore` entries are resolved against
    pub cwd: PathBuf,
    /// Project name
    pub project: String,
    /// Interactive size-explanation mode
    pub why: bool,
    /// Persist a bundle-stats snapshot
    pub save_bundle: bool,
    /// Running under a test environment (no interactive viewer)
    pub test_environment: bool,
}

impl RunConfig {
    /// Create settings rooted at `cwd`, naming the project after the directory
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let project = project_name_for(&cwd);
        Self {
            cwd,
            project,
            why: false,
            save_bundle: false,
            test_environment: false,
        }
    }

    /// Create settings rooted at the process working directory
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Override the project name
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Toggle interactive size-explanation mode
    pub fn with_why(mut self, why: bool) -> Self {
        self.why = why;
        self
    }

    /// Toggle stats snapshot mode
    pub fn with_save_bundle(mut self, save_bundle: bool) -> Self {
        self.save_bundle = save_bundle;
        self
    }

    /// Mark the run as executing under a test environment
    pub fn with_test_environment(mut self, test_environment: bool) -> Self {
        self.test_environment = test_environment;
        self
    }
}

fn project_name_for(cwd: &Path) -> String {
    cwd.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROJECT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_files_accepts_single_string() {
        let check: Check = toml_edit::de::from_str(
            r#"
name = "single"
files = "/abs/index.js"
"#,
        )
        .unwrap();

        assert_eq!(check.files, vec![PathBuf::from("/abs/index.js")]);
    }

    #[test]
    fn test_check_files_accepts_list_and_keeps_order() {
        let check: Check = toml_edit::de::from_str(
            r#"
name = "many"
files = ["/b.js", "/a.js"]
"#,
        )
        .unwrap();

        assert_eq!(
            check.files,
            vec![PathBuf::from("/b.js"), PathBuf::from("/a.js")]
        );
    }

    #[test]
    fn test_check_json_accepts_camel_case_concatenation_flag() {
        let check: Check =
            serde_json::from_str(r#"{ "name": "x", "disableModuleConcatenation": true }"#)
                .unwrap();
        assert!(check.disable_module_concatenation);
    }

    #[test]
    fn test_check_toml_uses_kebab_case_keys() {
        let check: Check = toml_edit::de::from_str(
            r#"
name = "x"
disable-module-concatenation = true
gzip = false
"#,
        )
        .unwrap();

        assert!(check.disable_module_concatenation);
        assert!(!check.gzip_enabled());
    }

    #[test]
    fn test_gzip_defaults_to_enabled() {
        assert!(Check::new("x").gzip_enabled());

        let mut check = Check::new("x");
        check.gzip = Some(true);
        assert!(check.gzip_enabled());
    }

    #[test]
    fn test_ignore_entries_skip_empty_strings() {
        let check = Check::new("x").with_ignore(["", "react", ""]);
        assert_eq!(check.ignore_entries().collect::<Vec<_>>(), vec!["react"]);
    }

    #[test]
    fn test_has_imports_false_for_empty_map() {
        let mut check = Check::new("x");
        check.import = Some(BTreeMap::new());
        assert!(!check.has_imports());
    }

    #[test]
    fn test_fill_check_names_prefers_path_then_files() {
        let mut config = ConfigFile {
            project: None,
            checks: vec![
                Check::default().with_path("dist/index.js"),
                Check::default().with_files(["/abs/a.js"]),
                Check::default(),
                Check::new("named"),
            ],
        };

        config.fill_check_names();

        assert_eq!(config.checks[0].name, "dist/index.js");
        assert_eq!(config.checks[1].name, "/abs/a.js");
        assert_eq!(config.checks[2].name, "check #3");
        assert_eq!(config.checks[3].name, "named");
    }

    #[test]
    fn test_run_config_project_defaults_to_directory_name() {
        let run = RunConfig::new("/work/widgets");
        assert_eq!(run.project, "widgets");

        let root = RunConfig::new("/");
        assert_eq!(root.project, DEFAULT_PROJECT);
    }
}
