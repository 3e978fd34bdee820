use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::matcher::FileMatcher;
use crate::config::SearchConfig;
use crate::errors::{SearchError, SearchResult};
use crate::filters::{check_file, is_excluded_dir};
use crate::results::ResultSet;

/// Path an ignore error refers to, falling back to the walk root
fn error_path(err: &ignore::Error, fallback: &Path) -> PathBuf {
    match err {
        ignore::Error::WithPath { path, .. } => path.clone(),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err, fallback)
        }
        _ => fallback.to_path_buf(),
    }
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
}

/// Walks `root` depth-first, scanning every file that passes the filters.
///
/// Entries are visited in directory listing order. Directories named in
/// `exclude_dirs` are pruned (the root itself never is), symbolic links are
/// neither followed nor scanned, and the first unreadable directory or file
/// aborts the walk.
pub fn walk(root: &Path, config: &SearchConfig, results: &mut ResultSet) -> SearchResult<()> {
    let exclude_dirs = config.exclude_dirs.clone();
    let mut walker = WalkBuilder::new(root);
    walker
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            if is_dir(entry) && is_excluded_dir(entry.path(), &exclude_dirs) {
                debug!("Skipping excluded directory: {}", entry.path().display());
                return false;
            }
            true
        });

    let matcher = FileMatcher::new(root, config);

    for entry in walker.build() {
        let entry = entry.map_err(|e| SearchError::walk(error_path(&e, root), e))?;
        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            debug!("Entering directory: {}", entry.path().display());
            results.dirs_visited += 1;
        } else if file_type.is_file() {
            match check_file(entry.path(), config) {
                Ok(()) => {
                    matcher.process_file(entry.path(), results)?;
                }
                Err(reason) => {
                    trace!("Skipping {} ({:?})", entry.path().display(), reason);
                    results.files_skipped += 1;
                }
            }
        }
    }

    Ok(())
}
