//! Configuration file discovery, loading and saving

use super::file::{Check, ConfigFile, CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// JSON configs are either a bare list of checks or a full config object
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonConfig {
    Checks(Vec<Check>),
    File(ConfigFile),
}

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Locate the config file in `project_root`, preferring TOML over JSON
    pub fn find(project_root: &Path) -> Option<PathBuf> {
        Self::find_with_fs(project_root, &RealFileSystem)
    }

    /// Locate the config file with a custom filesystem implementation
    pub fn find_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Option<PathBuf> {
        [CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME]
            .iter()
            .map(|name| project_root.join(name))
            .find(|path| fs.exists(path))
    }

    /// Load the config from `project_root`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use limit_pack::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("{} checks", config.checks.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = Self::find_with_fs(project_root, fs).with_context(|| {
            format!(
                "No {} or {} found in {}",
                CONFIG_FILE_NAME,
                JSON_CONFIG_FILE_NAME,
                project_root.display()
            )
        })?;

        let contents = fs
            .read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config = Self::parse(&config_path, &contents)?;
        config.fill_check_names();
        log::debug!(
            "loaded {} checks from {}",
            config.checks.len(),
            config_path.display()
        );

        Ok(config)
    }

    /// Parse config contents, choosing the format by file extension
    pub fn parse(config_path: &Path, contents: &str) -> Result<ConfigFile> {
        let is_json = config_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let parsed: JsonConfig = serde_json::from_str(contents)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            Ok(match parsed {
                JsonConfig::Checks(checks) => ConfigFile {
                    project: None,
                    checks,
                },
                JsonConfig::File(file) => file,
            })
        } else {
            toml_edit::de::from_str(contents)
                .with_context(|| format!("Failed to parse {}", config_path.display()))
        }
    }

    /// Save config as `.size-limit.toml` in the given directory
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<PathBuf> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<PathBuf> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

        Ok(config_path)
    }

    /// Check if any config file exists in the project
    pub fn exists(project_root: &Path) -> bool {
        Self::find(project_root).is_some()
    }
}
