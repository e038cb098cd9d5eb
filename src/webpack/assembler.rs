//! Base configuration assembly

use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::{Check, RunConfig};

use super::schema::{
    CompiledConfig, CssLoaderOptions, ModuleConfig, Optimization, Output, Plugin, Resolve,
    ResolvePlugin, Rule, RuleUse, ENTRY_NAME,
};

/// Static assets emitted as files instead of bundled code
pub const STATIC_ASSET_PATTERN: &str =
    r"\.(eot|woff2?|ttf|otf|svg|png|jpe?g|gif|webp|mp4|mp3|ogg|pdf|html|ico|md)$";

/// Any stylesheet
pub const CSS_PATTERN: &str = r"\.css$";

/// CSS modules, recognized by the `.module.css` suffix
pub const CSS_MODULE_PATTERN: &str = r"\.module\.css$";

static STATIC_ASSET_RE: OnceLock<Regex> = OnceLock::new();
static CSS_RE: OnceLock<Regex> = OnceLock::new();
static CSS_MODULE_RE: OnceLock<Regex> = OnceLock::new();

fn static_asset_re() -> &'static Regex {
    STATIC_ASSET_RE
        .get_or_init(|| Regex::new(STATIC_ASSET_PATTERN).expect("static asset regex is valid"))
}

fn css_re() -> &'static Regex {
    CSS_RE.get_or_init(|| Regex::new(CSS_PATTERN).expect("css regex is valid"))
}

fn css_module_re() -> &'static Regex {
    CSS_MODULE_RE.get_or_init(|| Regex::new(CSS_MODULE_PATTERN).expect("css module regex is valid"))
}

/// Loader rules: static assets, global CSS, then CSS modules
pub fn module_rules() -> Vec<Rule> {
    vec![
        Rule {
            test: static_asset_re().clone(),
            exclude: None,
            uses: vec![RuleUse::Named("file-loader")],
        },
        Rule {
            test: css_re().clone(),
            exclude: Some(css_module_re().clone()),
            uses: vec![RuleUse::Named("style-loader"), RuleUse::Named("css-loader")],
        },
        Rule {
            test: css_module_re().clone(),
            exclude: None,
            uses: vec![
                RuleUse::Named("style-loader"),
                RuleUse::Configured {
                    loader: "css-loader",
                    options: CssLoaderOptions { modules: true },
                },
            ],
        },
    ]
}

/// Build the base configuration for a check
///
/// `entry` is the file list the entry point bundles. Externals and
/// instrumentation are added by later pipeline steps.
pub fn assemble(run: &RunConfig, check: &Check, entry: Vec<PathBuf>, output: &Path) -> CompiledConfig {
    let mut entries = BTreeMap::new();
    entries.insert(ENTRY_NAME.to_string(), entry);

    CompiledConfig {
        entry: entries,
        output: Output {
            path: output.to_path_buf(),
            filename: run.why.then(|| format!("{}.js", run.project)),
        },
        optimization: Optimization {
            concatenate_modules: !check.disable_module_concatenation,
        },
        resolve: Resolve {
            plugins: vec![ResolvePlugin::PnpResolver],
        },
        resolve_loader: Resolve {
            plugins: vec![ResolvePlugin::PnpModuleLoader],
        },
        module: ModuleConfig {
            rules: module_rules(),
        },
        externals: None,
        plugins: vec![Plugin::OptimizeCssAssets],
    }
}
