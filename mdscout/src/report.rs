//! Markdown report generation.
//!
//! The document is grouped by target string (in configuration order) and then
//! by top-level folder (in first-seen order). File names, paths and line
//! contents are embedded verbatim, without Markdown escaping.
use std::fmt;
use std::path::Path;

use crate::config::{ReportLabels, SearchConfig};
use crate::errors::{SearchError, SearchResult};
use crate::results::{group_by_folder, ResultSet};

/// Base name of the search root, as shown in the report heading
pub fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// Builds the Markdown document for a completed search
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder<'a> {
    targets: &'a [String],
    labels: &'a ReportLabels,
}

/// A report ready to be rendered with `Display`
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    builder: ReportBuilder<'a>,
    root_name: &'a str,
    results: &'a ResultSet,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        Self {
            targets: &config.target_strings,
            labels: &config.labels,
        }
    }

    /// Prepares a report over `results` without rendering it
    pub fn report(&self, root_name: &'a str, results: &'a ResultSet) -> Report<'a> {
        Report {
            builder: *self,
            root_name,
            results,
        }
    }

    /// Renders the full document
    pub fn build(&self, root_name: &str, results: &ResultSet) -> String {
        let builder: ReportBuilder<'_> = *self;
        builder.report(root_name, results).to_string()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.builder.labels;
        writeln!(f, "## {} {}\n", self.root_name, labels.results_heading)?;

        for (index, target) in self.builder.targets.iter().enumerate() {
            let matches = self.results.matches_for(index);
            if matches.is_empty() {
                continue;
            }

            writeln!(
                f,
                "### 🔗 {} ({}{})\n",
                target,
                matches.len(),
                labels.count_suffix
            )?;

            for (folder, group) in group_by_folder(matches) {
                writeln!(f, "#### 📁 {}\n", folder)?;
                for (ordinal, m) in group.iter().enumerate() {
                    writeln!(f, "##### {}. `{}` (line {})", ordinal + 1, m.file, m.line_number)?;
                    writeln!(f, "{}: `{}`\n", labels.path_label, m.relative_path)?;
                    writeln!(f, "```{}", labels.fence_language)?;
                    writeln!(f, "{}", m.content)?;
                    writeln!(f, "```\n")?;
                }
            }
        }

        Ok(())
    }
}

/// Writes the report, replacing any existing file
pub fn write_report(path: &Path, contents: &str) -> SearchResult<()> {
    std::fs::write(path, contents).map_err(|e| SearchError::report_write(path, e))
}
