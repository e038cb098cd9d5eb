//! Bundler configuration schema
//!
//! These types serialize (camelCase) to the configuration object the bundling
//! engine and the bundle-analyzer plugin consume. Regular-expression fields
//! serialize to their source text.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::externals::Externals;

/// Name of the single entry point
pub const ENTRY_NAME: &str = "index";

/// Finished configuration for one check
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledConfig {
    /// Entry point name to the files it bundles
    pub entry: BTreeMap<String, Vec<PathBuf>>,
    /// Where the bundle is written
    pub output: Output,
    /// Optimization toggles
    pub optimization: Optimization,
    /// Module resolution hooks
    pub resolve: Resolve,
    /// Loader package resolution hooks
    pub resolve_loader: Resolve,
    /// Loader rules
    pub module: ModuleConfig,
    /// Modules left out of the bundle, present only when the check ignores some
    #[serde(skip_serializing_if = "Option::is_none")]
    pub externals: Option<Externals>,
    /// Plugins, in application order
    pub plugins: Vec<Plugin>,
}

impl CompiledConfig {
    /// Files bundled by the entry point
    pub fn entry_files(&self) -> &[PathBuf] {
        self.entry.get(ENTRY_NAME).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Options of the attached bundle-analyzer plugin, if any
    pub fn analyzer(&self) -> Option<&AnalyzerOptions> {
        self.plugins.iter().find_map(|plugin| match plugin {
            Plugin::BundleAnalyzer(options) => Some(options),
            _ => None,
        })
    }

    /// First loader rule that applies to `path`
    pub fn rule_for(&self, path: &str) -> Option<&Rule> {
        self.module.rules.iter().find(|rule| rule.applies_to(path))
    }
}

/// Output descriptor
#[derive(Debug, Clone, Serialize)]
pub struct Output {
    /// Output directory
    pub path: PathBuf,
    /// Bundle file name; the bundler's default when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Optimization flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    /// Cross-module concatenation (scope hoisting)
    pub concatenate_modules: bool,
}

/// Resolution plugin list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolve {
    /// Plugins consulted during resolution
    pub plugins: Vec<ResolvePlugin>,
}

/// Plug'n'Play resolution hooks for strict, pre-resolved installs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolvePlugin {
    /// Resolves regular module requests
    #[serde(rename = "pnp-webpack-plugin")]
    PnpResolver,
    /// Resolves loader packages
    #[serde(rename = "pnp-webpack-plugin#moduleLoader")]
    PnpModuleLoader,
}

/// Module section holding loader rules
#[derive(Debug, Clone, Serialize)]
pub struct ModuleConfig {
    /// Rules, in declaration order
    pub rules: Vec<Rule>,
}

/// Loader rule: which files, and the loader chain they go through
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    /// Files the rule applies to
    #[serde(serialize_with = "serialize_regex")]
    pub test: Regex,
    /// Files excluded even when `test` matches
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_regex"
    )]
    pub exclude: Option<Regex>,
    /// Loader chain
    #[serde(rename = "use")]
    pub uses: Vec<RuleUse>,
}

impl Rule {
    /// Whether the rule applies to a file path
    pub fn applies_to(&self, path: &str) -> bool {
        self.test.is_match(path) && !self.exclude.as_ref().is_some_and(|re| re.is_match(path))
    }

    /// Loader names in chain order
    pub fn loaders(&self) -> Vec<&str> {
        self.uses.iter().map(RuleUse::loader).collect()
    }
}

/// One loader in a rule's chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RuleUse {
    /// Loader with default options
    Named(&'static str),
    /// Loader with explicit options
    Configured {
        /// Loader package
        loader: &'static str,
        /// Loader options
        options: CssLoaderOptions,
    },
}

impl RuleUse {
    /// Loader package name
    pub fn loader(&self) -> &str {
        match self {
            Self::Named(loader) | Self::Configured { loader, .. } => loader,
        }
    }
}

/// Options for the CSS loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CssLoaderOptions {
    /// Scoped (local) class-name generation
    pub modules: bool,
}

/// Bundler plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", content = "options")]
pub enum Plugin {
    /// CSS minimizer
    #[serde(rename = "optimize-css-assets-webpack-plugin")]
    OptimizeCssAssets,
    /// Bundle-size analysis
    #[serde(rename = "webpack-bundle-analyzer")]
    BundleAnalyzer(AnalyzerOptions),
}

/// Options for the bundle-analyzer plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerOptions {
    /// Open the viewer when the report is ready
    pub open_analyzer: bool,
    /// How the report is produced
    pub analyzer_mode: AnalyzerMode,
    /// Size shown by default in the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sizes: Option<SizeMetric>,
    /// Port of the interactive viewer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer_port: Option<u16>,
    /// Write a machine-readable stats file
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub generate_stats_file: bool,
}

/// Report mode of the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerMode {
    /// Serve an interactive viewer
    Server,
    /// Write a static HTML report
    Static,
    /// No report
    Disabled,
}

/// Size metric of analyzer entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMetric {
    /// Gzip-compressed size
    Gzip,
    /// Minified, uncompressed size
    Parsed,
}

pub(crate) fn serialize_regex<S: Serializer>(re: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(re.as_str())
}

fn serialize_optional_regex<S: Serializer>(
    re: &Option<Regex>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match re {
        Some(re) => serializer.serialize_str(re.as_str()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plugin_serializes_with_package_name() {
        let value = serde_json::to_value(Plugin::OptimizeCssAssets).unwrap();
        assert_eq!(value, json!({ "plugin": "optimize-css-assets-webpack-plugin" }));
    }

    #[test]
    fn test_analyzer_options_skip_unset_fields() {
        let plugin = Plugin::BundleAnalyzer(AnalyzerOptions {
            open_analyzer: false,
            analyzer_mode: AnalyzerMode::Disabled,
            default_sizes: None,
            analyzer_port: None,
            generate_stats_file: true,
        });

        let value = serde_json::to_value(plugin).unwrap();
        assert_eq!(
            value,
            json!({
                "plugin": "webpack-bundle-analyzer",
                "options": {
                    "openAnalyzer": false,
                    "analyzerMode": "disabled",
                    "generateStatsFile": true
                }
            })
        );
    }

    #[test]
    fn test_rule_serializes_regex_source_and_use_chain() {
        let rule = Rule {
            test: Regex::new(r"\.module\.css$").unwrap(),
            exclude: None,
            uses: vec![
                RuleUse::Named("style-loader"),
                RuleUse::Configured {
                    loader: "css-loader",
                    options: CssLoaderOptions { modules: true },
                },
            ],
        };

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({
                "test": r"\.module\.css$",
                "use": [
                    "style-loader",
                    { "loader": "css-loader", "options": { "modules": true } }
                ]
            })
        );
    }

    #[test]
    fn test_rule_exclude_wins_over_test() {
        let rule = Rule {
            test: Regex::new(r"\.css$").unwrap(),
            exclude: Some(Regex::new(r"\.module\.css$").unwrap()),
            uses: vec![RuleUse::Named("css-loader")],
        };

        assert!(rule.applies_to("app.css"));
        assert!(!rule.applies_to("app.module.css"));
        assert!(!rule.applies_to("app.js"));
        assert_eq!(rule.loaders(), vec!["css-loader"]);
    }

    #[test]
    fn test_resolve_plugins_serialize_as_package_names() {
        let resolve = Resolve {
            plugins: vec![ResolvePlugin::PnpResolver, ResolvePlugin::PnpModuleLoader],
        };
        assert_eq!(
            serde_json::to_value(resolve).unwrap(),
            json!({ "plugins": ["pnp-webpack-plugin", "pnp-webpack-plugin#moduleLoader"] })
        );
    }
}
