use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::walker::walk;
use crate::config::SearchConfig;
use crate::errors::SearchResult;
use crate::report::{root_name, write_report, ReportBuilder};
use crate::results::ResultSet;

/// Default report file, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "search_results.md";

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Where the report was written
    pub output: PathBuf,
    /// Everything that matched
    pub results: ResultSet,
}

/// Searches the tree under `root` and returns all matches
pub fn search_in(root: &Path, config: &SearchConfig) -> SearchResult<ResultSet> {
    config.validate()?;
    info!(
        "Starting search in {} with targets: {:?}",
        root.display(),
        config.target_strings
    );
    if config.include_extensions.is_empty() {
        warn!("No include extensions configured, no file will be scanned");
    }

    let mut results = ResultSet::new();
    walk(root, config, &mut results)?;

    info!(
        "Search complete. Found {} matches in {} files ({} directories visited, {} files skipped)",
        results.total_matches(),
        results.files_searched,
        results.dirs_visited,
        results.files_skipped
    );
    Ok(results)
}

/// Searches `root` and writes the Markdown report to `output`
pub fn run_in(root: &Path, config: &SearchConfig, output: &Path) -> SearchResult<RunSummary> {
    let results = search_in(root, config)?;
    let report = ReportBuilder::new(config).build(&root_name(root), &results);
    write_report(output, &report)?;
    info!("Report written to {}", output.display());

    Ok(RunSummary {
        output: output.to_path_buf(),
        results,
    })
}

/// Searches the current working directory and writes the report to `output`
pub fn run(config: &SearchConfig, output: &Path) -> SearchResult<RunSummary> {
    let root = std::env::current_dir()?;
    run_in(&root, config, output)
}
