//! Synthetic entry module for import checks
//!
//! When a check measures named imports, a throwaway module imports each
//! binding and logs the bound names. The log keeps the bundler from
//! tree-shaking the imports away, so the bundle holds the cost of importing
//! them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Check;
use crate::error::LimitError;

/// File name of the synthesized entry inside the output directory
pub const ENTRY_FILE_NAME: &str = "entry.js";

/// Local names an import binding introduces
///
/// `{ a, b as c }` gives `a, c`; `* as ns` gives `ns`; a default import
/// gives its own name.
///
/// # Examples
///
/// ```
/// use limit_pack::webpack::entry::local_names;
///
/// assert_eq!(local_names("{ a, b }"), vec!["a", "b"]);
/// assert_eq!(local_names("React, { useState as useS }"), vec!["React", "useS"]);
/// assert_eq!(local_names("* as ns"), vec!["ns"]);
/// ```
pub fn local_names(binding: &str) -> Vec<&str> {
    binding
        .split(['{', '}', ','])
        .filter_map(|specifier| specifier.split_whitespace().last())
        .collect()
}

/// Source text of the synthetic entry module
pub fn entry_source(imports: &BTreeMap<String, String>) -> String {
    let mut source = String::new();
    for (specifier, binding) in imports {
        let quoted = serde_json::Value::from(specifier.as_str()).to_string();
        let binding = binding.trim();

        if binding.is_empty() {
            source.push_str(&format!("import {quoted}\n"));
            continue;
        }

        source.push_str(&format!("import {binding} from {quoted}\n"));
        source.push_str(&format!("console.log({})\n", local_names(binding).join(", ")));
    }
    source
}

/// Write the synthetic entry for an import check and point `files` at it
///
/// Does nothing and returns `None` for checks without imports. Creates
/// `output` when missing. On success `check.files` holds only the entry path.
pub async fn synthesize_entry(
    check: &mut Check,
    output: &Path,
) -> Result<Option<PathBuf>, LimitError> {
    let Some(imports) = check.import.as_ref().filter(|imports| !imports.is_empty()) else {
        return Ok(None);
    };

    let source = entry_source(imports);
    let entry = output.join(ENTRY_FILE_NAME);

    tokio::fs::create_dir_all(output)
        .await
        .map_err(|source| LimitError::EntryWrite {
            check: check.name.clone(),
            path: output.to_path_buf(),
            source,
        })?;

    tokio::fs::write(&entry, source)
        .await
        .map_err(|source| LimitError::EntryWrite {
            check: check.name.clone(),
            path: entry.clone(),
            source,
        })?;

    log::debug!("check '{}': wrote entry {}", check.name, entry.display());
    check.files = vec![entry.clone()];
    Ok(Some(entry))
}
