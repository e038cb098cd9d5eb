//! Ignore-list compilation into an externals predicate
//!
//! All ignored specifiers are escaped and joined into one anchored pattern,
//! `^(a|b)($|/)`, so `foo` matches `foo` and `foo/sub` but never `foobar`.

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::error::LimitError;

use super::schema::serialize_regex;

/// Global binding ignored modules are resolved to
pub const EXTERNAL_GLOBAL: &str = "root a";

/// Compiled-size cap for the externals pattern, far above the regex default
/// so ignore lists of tens of thousands of entries still compile
pub const IGNORE_PATTERN_SIZE_LIMIT: usize = 1 << 30;

/// Outcome of resolving one module request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalDecision {
    /// Resolve and bundle normally
    Bundle,
    /// Leave out of the bundle; provided at runtime by this global binding
    ExternalAs(&'static str),
}

/// Compiled externals predicate
///
/// # Examples
///
/// ```
/// use limit_pack::webpack::{ExternalDecision, Externals, EXTERNAL_GLOBAL};
///
/// let externals = Externals::compile("core", ["foo", "bar/baz"])?
///     .expect("non-empty ignore list");
///
/// assert_eq!(externals.resolve("foo/sub"), ExternalDecision::ExternalAs(EXTERNAL_GLOBAL));
/// assert_eq!(externals.resolve("foobar"), ExternalDecision::Bundle);
/// # Ok::<(), limit_pack::error::LimitError>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Externals {
    #[serde(serialize_with = "serialize_regex")]
    pattern: Regex,
    global: &'static str,
}

impl Externals {
    /// Compile ignored specifiers into one anchored pattern
    ///
    /// Empty entries are skipped. Returns `None` when nothing is left to
    /// ignore, in which case the config carries no externals at all. A
    /// pattern that does not compile is an error naming `check`.
    pub fn compile<'a, I>(check: &str, ignore: I) -> Result<Option<Self>, LimitError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let escaped: Vec<String> = ignore
            .into_iter()
            .filter(|entry| !entry.is_empty())
            .map(regex::escape)
            .collect();

        if escaped.is_empty() {
            return Ok(None);
        }

        let source = format!("^({})($|/)", escaped.join("|"));
        log::debug!(
            "check '{check}': compiling externals pattern of {} entries",
            escaped.len()
        );

        let pattern = RegexBuilder::new(&source)
            .size_limit(IGNORE_PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|source| LimitError::IgnorePattern {
                check: check.to_string(),
                source,
            })?;

        Ok(Some(Self {
            pattern,
            global: EXTERNAL_GLOBAL,
        }))
    }

    /// Decide how a module request is handled
    pub fn resolve(&self, request: &str) -> ExternalDecision {
        if self.pattern.is_match(request) {
            ExternalDecision::ExternalAs(self.global)
        } else {
            ExternalDecision::Bundle
        }
    }

    /// Whether a module request is left out of the bundle
    pub fn is_external(&self, request: &str) -> bool {
        self.resolve(request) != ExternalDecision::Bundle
    }

    /// The compiled pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_matches_entry_and_subpaths_only() {
        let externals = Externals::compile("c", ["foo", "bar/baz"]).unwrap().unwrap();

        assert!(externals.is_external("foo"));
        assert!(externals.is_external("foo/sub"));
        assert!(externals.is_external("bar/baz"));
        assert!(externals.is_external("bar/baz/deep/file.js"));

        assert!(!externals.is_external("foobar"));
        assert!(!externals.is_external("barbaz/baz"));
        assert!(!externals.is_external("bar"));
        assert!(!externals.is_external("lib/foo"));
    }

    #[test]
    fn test_pattern_escapes_regex_metacharacters() {
        let externals = Externals::compile("c", ["lodash.debounce", "@scope/pkg+x"]).unwrap().unwrap();

        assert!(externals.is_external("lodash.debounce"));
        assert!(!externals.is_external("lodashXdebounce"));
        assert!(externals.is_external("@scope/pkg+x/sub"));
        assert!(!externals.is_external("@scope/pkgx"));
    }

    #[test]
    fn test_pattern_source_is_single_anchored_alternation() {
        let externals = Externals::compile("c", ["react", "lit.js"]).unwrap().unwrap();
        assert_eq!(externals.pattern().as_str(), r"^(react|lit\.js)($|/)");
    }

    #[test]
    fn test_compile_empty_list_returns_none() {
        assert!(Externals::compile("c", std::iter::empty::<&str>()).unwrap().is_none());
        assert!(Externals::compile("c", [""]).unwrap().is_none());
    }

    #[test]
    fn test_resolve_reports_global_binding() {
        let externals = Externals::compile("c", ["react"]).unwrap().unwrap();
        assert_eq!(
            externals.resolve("react"),
            ExternalDecision::ExternalAs("root a")
        );
        assert_eq!(externals.resolve("preact"), ExternalDecision::Bundle);
    }

    #[test]
    fn test_externals_serialize_pattern_and_global() {
        let externals = Externals::compile("c", ["foo"]).unwrap().unwrap();
        let value = serde_json::to_value(&externals).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "pattern": "^(foo)($|/)", "global": "root a" })
        );
    }

    #[test]
    fn test_large_ignore_list_still_compiles() {
        let ignore: Vec<String> = (0..10_000)
            .map(|i| format!("@scope-{i}/package-name-{i}"))
            .collect();

        let externals = Externals::compile("monorepo", ignore.iter().map(String::as_str))
            .expect("large ignore list compiles")
            .expect("non-empty ignore list");

        assert!(externals.is_external("@scope-0/package-name-0"));
        assert!(externals.is_external("@scope-9999/package-name-9999/sub"));
        assert!(!externals.is_external("@scope-9999/package-name-99999"));
    }

    use proptest::prelude::*;

    proptest! {
        /// An ignored specifier matches itself and anything below it
        #[test]
        fn prop_entry_matches_itself_and_subpaths(
            entry in "[a-z@][a-z0-9._-]{0,12}(/[a-z0-9._-]{1,8})?",
            sub in "[a-z0-9._-]{1,8}"
        ) {
            let externals = Externals::compile("c", [entry.as_str()]).unwrap().unwrap();
            prop_assert!(externals.is_external(&entry));
            let subpath = format!("{entry}/{sub}");
            prop_assert!(externals.is_external(&subpath));
        }

        /// A longer name sharing the prefix is never treated as external
        #[test]
        fn prop_prefix_sharing_names_are_bundled(
            entry in "[a-z@][a-z0-9._-]{0,12}",
            suffix in "[a-z0-9]{1,6}"
        ) {
            let externals = Externals::compile("c", [entry.as_str()]).unwrap().unwrap();
            let longer = format!("{entry}{suffix}");
            prop_assert!(!externals.is_external(&longer));
        }
    }
}
