//! Input validation
//!
//! Confirms that every file a check bundles exists before anything else runs.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::config::{Check, RunConfig};
use crate::error::LimitError;
use crate::infra::{FileSystem, RealFileSystem};

/// Resolve `path` against `cwd` and normalize it lexically
///
/// `.` segments and repeated separators are dropped and each `..` removes the
/// segment before it, without touching the filesystem. `..` at the root stays
/// at the root.
pub fn resolve_against(cwd: &Path, path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in cwd.join(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = resolved.components().next_back();
                if matches!(last, Some(Component::Normal(_))) {
                    resolved.pop();
                } else if !matches!(last, Some(Component::RootDir | Component::Prefix(_))) {
                    resolved.push(component);
                }
            }
            other => resolved.push(other),
        }
    }
    resolved
}

/// Candidate files of a check, split by the ignore list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Files left to bundle
    pub files: Vec<PathBuf>,
    /// Candidates removed because they are ignored
    pub removed: Vec<PathBuf>,
}

/// Files a check would bundle, after removing ignored ones
///
/// The candidate set is `files` plus `path`, each resolved against the run's
/// `cwd`, in that order with duplicates collapsed. Ignore entries are
/// resolved the same way and removed from it.
pub fn candidate_files(run: &RunConfig, check: &Check) -> Candidates {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let files = check.files.iter().map(|file| resolve_against(&run.cwd, file));
    let from_path = check.path.as_deref().map(|p| resolve_against(&run.cwd, p));
    for file in files.chain(from_path) {
        if seen.insert(file.clone()) {
            candidates.push(file);
        }
    }

    let ignored: Vec<PathBuf> = check
        .ignore_entries()
        .map(|entry| resolve_against(&run.cwd, Path::new(entry)))
        .collect();

    let (removed, files): (Vec<PathBuf>, Vec<PathBuf>) = candidates
        .into_iter()
        .partition(|file| ignored.contains(file));
    Candidates { files, removed }
}

/// Validate a check against the real filesystem
///
/// # Examples
///
/// ```no_run
/// use limit_pack::config::{Check, RunConfig};
/// use limit_pack::webpack::validator::validate_check;
///
/// let run = RunConfig::new("/work/my-lib");
/// let files = validate_check(&run, &Check::new("core").with_path("dist/index.js"))?;
/// assert_eq!(files.len(), 1);
/// # Ok::<(), limit_pack::error::LimitError>(())
/// ```
pub fn validate_check(run: &RunConfig, check: &Check) -> Result<Vec<PathBuf>, LimitError> {
    validate_check_with_fs(run, check, &RealFileSystem)
}

/// Validate a check with a custom filesystem implementation
///
/// Returns the remaining candidate files. Fails when the ignore list removed
/// every candidate, when a check without imports has nothing to bundle, or
/// when any remaining candidate is missing on disk.
pub fn validate_check_with_fs<FS: FileSystem>(
    run: &RunConfig,
    check: &Check,
    fs: &FS,
) -> Result<Vec<PathBuf>, LimitError> {
    let Candidates {
        files: candidates,
        removed,
    } = candidate_files(run, check);
    log::debug!(
        "check '{}': {} candidate files, {} ignored",
        check.name,
        candidates.len(),
        removed.len()
    );

    if candidates.is_empty() && (!removed.is_empty() || !check.has_imports()) {
        return Err(LimitError::NoFileToCheck {
            check: check.name.clone(),
        });
    }

    if let Some(missing) = candidates.iter().find(|file| !fs.exists(file)) {
        return Err(LimitError::MissingFile {
            check: check.name.clone(),
            path: missing.clone(),
        });
    }

    Ok(candidates)
}
