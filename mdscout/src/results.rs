//! Search result types.
//!
//! A [`ResultSet`] is created empty by the engine, lent mutably to the walker
//! and file matcher while the tree is traversed, and then only read by the
//! report builder.
use std::collections::BTreeMap;

/// Folder name used for files that sit directly in the search root
pub const ROOT_FOLDER: &str = "root";

/// A single (target string, line) occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// First component of the relative path, or [`ROOT_FOLDER`]
    pub folder: String,
    /// Base name of the file
    pub file: String,
    /// Path relative to the search root
    pub relative_path: String,
    /// 1-based line number
    pub line_number: usize,
    /// The matching line with surrounding whitespace trimmed
    pub content: String,
}

/// All matches of a search, keyed by target string index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    matches: BTreeMap<usize, Vec<Match>>,
    /// Directories entered, including the root
    pub dirs_visited: usize,
    /// Files read and matched line by line
    pub files_searched: usize,
    /// Regular files rejected by a filter
    pub files_skipped: usize,
}

impl ResultSet {
    /// Creates a new empty result set
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends a match for the target string at `target_index`
    pub fn push(&mut self, target_index: usize, m: Match) {
        self.matches.entry(target_index).or_default().push(m);
    }

    /// Matches recorded for a target, in accumulation order
    pub fn matches_for(&self, target_index: usize) -> &[Match] {
        self.matches
            .get(&target_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of matches across all targets
    pub fn total_matches(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Groups matches by folder, keeping folders in first-seen order and matches
/// in their original order within each folder
pub fn group_by_folder(matches: &[Match]) -> Vec<(&str, Vec<&Match>)> {
    let mut groups: Vec<(&str, Vec<&Match>)> = Vec::new();
    for m in matches {
        match groups.iter_mut().find(|(folder, _)| *folder == m.folder) {
            Some((_, group)) => group.push(m),
            None => groups.push((m.folder.as_str(), vec![m])),
        }
    }
    groups
}
