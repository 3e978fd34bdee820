use clap::Parser;
use colored::Colorize;
use mdscout::{
    config::{CliOverrides, EncodingMode, SearchConfig},
    search::{self, DEFAULT_OUTPUT},
    SearchError,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SearchError>;

/// Search the current directory for literal strings and write a Markdown report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// String to search for (can be specified multiple times, order is kept)
    #[arg(short = 't', long = "target")]
    targets: Vec<String>,

    /// File extensions to scan (e.g. .ts,.tsx or ts,tsx)
    #[arg(short = 'e', long)]
    extensions: Option<String>,

    /// Directory name to skip at any depth (can be specified multiple times)
    #[arg(short = 'x', long = "exclude-dir")]
    exclude_dirs: Vec<String>,

    /// File name to skip (can be specified multiple times)
    #[arg(long = "exclude-file")]
    exclude_files: Vec<String>,

    /// Report file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Additional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How to handle invalid UTF-8 sequences (failfast|lossy) [default: failfast]
    #[arg(long)]
    encoding: Option<EncodingMode>,

    /// Log level (trace, debug, info, warn, error) [default: warn]
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let extensions = self
            .extensions
            .as_deref()
            .map(|e| e.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        CliOverrides {
            target_strings: self.targets.clone(),
            include_extensions: extensions,
            exclude_dirs: self.exclude_dirs.clone(),
            exclude_files: self.exclude_files.clone(),
            encoding_mode: self.encoding,
            log_level: self.log_level.clone(),
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = SearchConfig::load_from(cli.config.as_deref())?.merge_with_cli(cli.overrides());
    init_tracing(&config.log_level);
    config.validate()?;

    let root = std::env::current_dir()?;
    println!("🔍 Searching in: {}", root.display());
    println!("🔎 Target strings: {:?}", config.target_strings);
    println!("📝 Output file: {}", cli.output.display().to_string().bold());

    let summary = search::run(&config, &cli.output)?;

    println!(
        "{}",
        format!("✅ 결과가 '{}'에 저장되었습니다.", summary.output.display()).green()
    );
    Ok(())
}
