//! Name-based filters applied during traversal.
//!
//! All checks look at the entry's own name only, never at its full path, so an
//! excluded directory name is pruned at whatever depth it appears.
use std::path::Path;

use crate::config::SearchConfig;

/// Why a file was not scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Hidden,
    ExcludedName,
    Extension,
}

/// Returns the final path component as a string, if it is valid UTF-8
fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}

/// Check if a name is hidden (starts with '.')
pub fn is_hidden(path: &Path) -> bool {
    file_name(path)
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// The extension including its leading dot, or an empty string when there is none.
///
/// `x.ts` gives `.ts`, `a.b.ts` gives `.ts`, `Makefile` gives an empty string
/// and `file.` gives `.`.
pub fn dotted_extension(path: &Path) -> String {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!(".{}", ext),
        None => String::new(),
    }
}

/// Checks if a file's extension is one of the included extensions (case sensitive)
pub fn has_included_extension(path: &Path, extensions: &[String]) -> bool {
    let ext = dotted_extension(path);
    !ext.is_empty() && extensions.iter().any(|e| *e == ext)
}

/// Checks if a directory must not be descended into
pub fn is_excluded_dir(path: &Path, exclude_dirs: &[String]) -> bool {
    file_name(path)
        .map(|name| exclude_dirs.iter().any(|d| d == name))
        .unwrap_or(false)
}

/// Checks if a file name is on the exclude list
pub fn is_excluded_file(path: &Path, exclude_files: &[String]) -> bool {
    file_name(path)
        .map(|name| exclude_files.iter().any(|f| f == name))
        .unwrap_or(false)
}

/// Decides whether a file is scanned, returning the reason when it is not
pub fn check_file(path: &Path, config: &SearchConfig) -> Result<(), SkipReason> {
    if is_excluded_file(path, &config.exclude_files) {
        return Err(SkipReason::ExcludedName);
    }
    if is_hidden(path) {
        return Err(SkipReason::Hidden);
    }
    if !has_included_extension(path, &config.include_extensions) {
        return Err(SkipReason::Extension);
    }
    Ok(())
}
