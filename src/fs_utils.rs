//! Filesystem helpers for locating parse-tree dumps
//!
//! - `normalize_path`: strips the Windows `\\?\` prefix so dump paths compare
//!   and sort the same way on every platform
//! - `collect_ptree_files`: expands files and directories into the sorted list
//!   of dumps to ingest

use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{FlinspectError, Result};

/// Normalize Windows paths by removing the `\\?\` prefix if present.
///
/// Source paths order the union of file graphs, so the same dump must
/// always be spelled the same way.
///
/// ```
/// use std::path::PathBuf;
/// use flinspect::fs_utils::normalize_path;
///
/// let path = PathBuf::from("/work/ocean/solver.f90_ptree");
/// assert_eq!(normalize_path(&path), path);
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        let s = path.to_string_lossy();
        if let Some(stripped) = s.strip_prefix(r"\\?\UNC\") {
            return PathBuf::from(format!(r"\\{}", stripped));
        }
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return PathBuf::from(stripped);
        }
    }
    path.to_path_buf()
}

/// Whether a file name carries the dump suffix
pub fn is_ptree_file(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix) && n.len() > suffix.len())
}

/// Expand `paths` into dump files.
///
/// Files named explicitly are kept whatever their name; directories are
/// walked for files ending in `suffix`. Ignore files are not consulted, since
/// dumps usually live in build trees that are ignored.
pub fn collect_ptree_files(paths: &[PathBuf], suffix: &str, follow_links: bool) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for path in paths {
        if path.is_file() {
            files.insert(normalize_path(path));
            continue;
        }
        if !path.is_dir() {
            return Err(FlinspectError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let mut builder = WalkBuilder::new(path);
        builder.standard_filters(false);
        builder.follow_links(follow_links);

        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("[FOREST] skipping unreadable entry under {}: {}", path.display(), err);
                    continue;
                }
            };
            if entry.file_type().is_some_and(|t| t.is_file()) && is_ptree_file(entry.path(), suffix) {
                files.insert(normalize_path(entry.path()));
            }
        }
    }
    Ok(files.into_iter().collect())
}
