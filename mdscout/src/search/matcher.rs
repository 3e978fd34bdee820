use std::borrow::Cow;
use std::path::{Component, Path};
use tracing::{trace, warn};

use crate::config::{EncodingMode, SearchConfig};
use crate::errors::{SearchError, SearchResult};
use crate::results::{Match, ResultSet, ROOT_FOLDER};

/// Case-sensitive literal containment over an ordered list of targets
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    targets: Vec<String>,
}

impl LiteralMatcher {
    /// Creates a matcher for the given target strings
    pub fn new(targets: Vec<String>) -> Self {
        Self { targets }
    }

    /// Indices of the targets contained in `line`, in target order.
    ///
    /// A target occurring several times in the line is reported once.
    pub fn matching_targets<'a>(&'a self, line: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.targets
            .iter()
            .enumerate()
            .filter(move |(_, target)| line.contains(target.as_str()))
            .map(|(index, _)| index)
    }
}

/// Decodes file bytes according to the encoding mode
fn decode_bytes(bytes: Vec<u8>, path: &Path, encoding_mode: EncodingMode) -> SearchResult<String> {
    match encoding_mode {
        EncodingMode::FailFast => {
            String::from_utf8(bytes).map_err(|e| SearchError::encoding_error(path, e))
        }
        EncodingMode::Lossy => {
            let cow = String::from_utf8_lossy(&bytes);
            // Owned means at least one invalid sequence was replaced
            if let Cow::Owned(_) = cow {
                warn!("Invalid UTF-8 replaced in file: {}", path.display());
            }
            Ok(cow.into_owned())
        }
    }
}

/// Splits a path relative to the root into (folder, relative path).
///
/// The folder is the first component, or [`ROOT_FOLDER`] for a file that sits
/// directly in the root.
fn attribute(path: &Path, root: &Path) -> (String, String) {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut components = relative
        .components()
        .filter(|c| matches!(c, Component::Normal(_)));
    let first = components.next();
    let folder = match (first, components.next()) {
        (Some(first), Some(_)) => first.as_os_str().to_string_lossy().into_owned(),
        _ => ROOT_FOLDER.to_string(),
    };
    (folder, relative.to_string_lossy().into_owned())
}

/// Trims whitespace around a line, including a byte order mark
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Reads single files and records their matching lines
#[derive(Debug)]
pub struct FileMatcher<'a> {
    root: &'a Path,
    matcher: LiteralMatcher,
    encoding_mode: EncodingMode,
}

impl<'a> FileMatcher<'a> {
    /// Creates a FileMatcher for files under `root`
    pub fn new(root: &'a Path, config: &SearchConfig) -> Self {
        Self {
            root,
            matcher: LiteralMatcher::new(config.target_strings.clone()),
            encoding_mode: config.encoding_mode,
        }
    }

    /// Scans one file, appending a match per (line, target) pair to `results`.
    ///
    /// Lines are split on `\n` only. Returns the number of matches added.
    pub fn process_file(&self, path: &Path, results: &mut ResultSet) -> SearchResult<usize> {
        trace!("Scanning file: {}", path.display());

        let bytes = std::fs::read(path).map_err(|e| SearchError::file_read(path, e))?;
        let contents = decode_bytes(bytes, path, self.encoding_mode)?;

        let (folder, relative_path) = attribute(path, self.root);
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut added = 0;
        for (index, line) in contents.split('\n').enumerate() {
            for target_index in self.matcher.matching_targets(line) {
                results.push(
                    target_index,
                    Match {
                        folder: folder.clone(),
                        file: file.clone(),
                        relative_path: relative_path.clone(),
                        line_number: index + 1,
                        content: trim_line(line).to_string(),
                    },
                );
                added += 1;
            }
        }

        results.files_searched += 1;
        Ok(added)
    }
}
