use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::{SearchError, SearchResult};

/// Configuration for a search run.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.mdscout.yaml` in the current directory
/// 3. Global `$HOME/.config/mdscout/config.yaml`
///
/// # Configuration Format
///
/// ```yaml
/// # Literal strings to look for; the order defines the report sections
/// target_strings:
///   - "useQuery"
///   - "fetchUser"
///
/// # File extensions to scan (leading dot optional)
/// include_extensions: [".ts", ".tsx"]
///
/// # Directory names never descended into
/// exclude_dirs: ["node_modules", "dist"]
///
/// # File names never scanned
/// exclude_files: ["generated.ts"]
///
/// # How to handle invalid UTF-8 (failfast, lossy)
/// encoding_mode: failfast
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
///
/// # Report wording
/// labels:
///   results_heading: "search results"
///   count_suffix: " hits"
///   path_label: "Path"
///   fence_language: "ts"
/// ```
///
/// Command-line arguments take precedence over config file values, see
/// [`SearchConfig::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Literal target strings, in report order
    #[serde(default)]
    pub target_strings: Vec<String>,

    /// Dot-prefixed file extensions to scan (e.g. [".ts", ".js"])
    #[serde(default)]
    pub include_extensions: Vec<String>,

    /// Directory names that are never descended into, at any depth
    #[serde(default)]
    pub exclude_dirs: Vec<String>,

    /// File names that are never scanned
    #[serde(default)]
    pub exclude_files: Vec<String>,

    /// How to handle files that are not valid UTF-8
    #[serde(default)]
    pub encoding_mode: EncodingMode,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Wording used in the Markdown report
    #[serde(default)]
    pub labels: ReportLabels,
}

/// How invalid UTF-8 in a scanned file is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Abort the run with an encoding error
    #[default]
    FailFast,
    /// Replace invalid sequences with U+FFFD and keep going
    Lossy,
}

impl FromStr for EncodingMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "failfast" => Ok(Self::FailFast),
            "lossy" => Ok(Self::Lossy),
            other => Err(SearchError::config_error(format!(
                "Unknown encoding mode '{}' (expected failfast or lossy)",
                other
            ))),
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailFast => write!(f, "failfast"),
            Self::Lossy => write!(f, "lossy"),
        }
    }
}

/// Fixed wording embedded in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    /// Follows the search root name in the top heading
    pub results_heading: String,
    /// Appended to each target's match count
    pub count_suffix: String,
    /// Precedes the relative path of each match
    pub path_label: String,
    /// Info string of the fenced code blocks
    pub fence_language: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            results_heading: "검색 결과".to_string(),
            count_suffix: "건".to_string(),
            path_label: "경로".to_string(),
            fence_language: "js".to_string(),
        }
    }
}

/// Values given on the command line.
///
/// Empty lists and `None` leave the configuration file value in place; anything
/// else replaces it, even when it equals the built-in default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub target_strings: Vec<String>,
    pub include_extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub encoding_mode: Option<EncodingMode>,
    pub log_level: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            target_strings: Vec::new(),
            include_extensions: Vec::new(),
            exclude_dirs: Vec::new(),
            exclude_files: Vec::new(),
            encoding_mode: EncodingMode::default(),
            log_level: default_log_level(),
            labels: ReportLabels::default(),
        }
    }
}

impl SearchConfig {
    /// Creates a configuration from the four search lists, with default
    /// encoding, log level and labels
    pub fn new<T, E, D, F>(targets: T, extensions: E, exclude_dirs: D, exclude_files: F) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            target_strings: targets.into_iter().map(Into::into).collect(),
            include_extensions: normalize_extensions(extensions.into_iter().map(Into::into)),
            exclude_dirs: exclude_dirs.into_iter().map(Into::into).collect(),
            exclude_files: exclude_files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Loads configuration from the default locations plus a specific file
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("mdscout/config.yaml")),
            Some(PathBuf::from(".mdscout.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let mut config: SearchConfig = builder.build()?.try_deserialize()?;
        config.include_extensions = normalize_extensions(config.include_extensions);
        Ok(config)
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if !cli.target_strings.is_empty() {
            self.target_strings = cli.target_strings;
        }
        if !cli.include_extensions.is_empty() {
            self.include_extensions = normalize_extensions(cli.include_extensions);
        }
        if !cli.exclude_dirs.is_empty() {
            self.exclude_dirs = cli.exclude_dirs;
        }
        if !cli.exclude_files.is_empty() {
            self.exclude_files = cli.exclude_files;
        }
        if let Some(mode) = cli.encoding_mode {
            self.encoding_mode = mode;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }

    /// Checks the invariants a search relies on
    pub fn validate(&self) -> SearchResult<()> {
        if self.target_strings.is_empty() {
            return Err(SearchError::config_error(
                "at least one target string is required",
            ));
        }
        if let Some(pos) = self.target_strings.iter().position(|t| t.is_empty()) {
            return Err(SearchError::config_error(format!(
                "target string #{} is empty",
                pos + 1
            )));
        }
        Ok(())
    }
}

/// Prefixes a dot to extensions given without one (`ts` -> `.ts`)
pub fn normalize_extensions<I>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    extensions
        .into_iter()
        .map(|ext| {
            let ext = ext.trim().to_string();
            if ext.is_empty() || ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        })
        .filter(|ext| !ext.is_empty())
        .collect()
}
