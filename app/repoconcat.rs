//! Command-line interface for repoconcat.
//!
//! Scans a repository and writes its statistics, folder structure, file
//! index and concatenated contents into a single document.

use clap::{Parser, ValueEnum};
use repoconcat::output::{self, OutputFormat};
use repoconcat::{
    BinaryDetection, ConcatBuilder, ConcatOptions, DEFAULT_IGNORE_FILE,
    DEFAULT_TRUNCATE_THRESHOLD, LineCounting, PatternSyntax, root_name, scan,
};
use std::path::{Path, PathBuf};
use std::process::exit;

/// repoconcat: concatenate a repository into one reviewable document
#[derive(Parser)]
#[command(name = "repoconcat", version, about, long_about = None)]
struct Cli {
    /// Root directory (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output file (default `<root name>.txt` in the current dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Pretty JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Ignore file name, looked up at the root
    #[arg(long, default_value = DEFAULT_IGNORE_FILE)]
    ignore_file: String,

    /// Ignore file dialect
    #[arg(long, value_enum, default_value_t = Syntax::Simple)]
    syntax: Syntax,

    /// Extra exclusion globs (can be repeated)
    #[arg(short = 'x', long = "exclude")]
    exclude_patterns: Vec<String>,

    /// Include empty files
    #[arg(long)]
    include_empty: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Binary detection strategy
    #[arg(long, default_value = "none", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Line budget for truncated structured files
    #[arg(long, default_value_t = DEFAULT_TRUNCATE_THRESHOLD)]
    truncate_lines: usize,

    /// Count lines without the extra trailing segment
    #[arg(long)]
    exact_lines: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Syntax {
    Simple,
    Gitignore,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn output_path(&self, format: OutputFormat) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{}.{}", root_name(&self.root), format.extension()))
        })
    }

    fn into_options(self, output_path: &Path) -> ConcatOptions {
        let tool_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()));
        let output_name = output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        let syntax = match self.syntax {
            Syntax::Simple => PatternSyntax::Simple,
            Syntax::Gitignore => PatternSyntax::Gitignore,
        };
        let counting = if self.exact_lines {
            LineCounting::Lines
        } else {
            LineCounting::Segments
        };
        ConcatBuilder::new(self.root)
            .ignore_file(self.ignore_file)
            .pattern_syntax(syntax)
            .exclude_patterns(self.exclude_patterns)
            .output_name(output_name)
            .tool_name(tool_name)
            .include_empty(self.include_empty)
            .follow_links(self.follow_links)
            .binary_detection(self.binary_detection)
            .truncate_threshold(self.truncate_lines)
            .line_counting(counting)
            .build()
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let format = match cli.format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
    };
    let (pretty, stdout) = (cli.pretty, cli.stdout);
    let output_path = cli.output_path(format);
    let options = cli.into_options(&output_path);

    let snapshot = match scan(options) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("An unexpected error occurred: {}", e);
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if stdout {
        match output::format_report(&snapshot, format, pretty) {
            Ok(out) => print!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                exit(1);
            }
        }
        return;
    }

    if let Err(e) = output::write_report(&snapshot, format, &output_path, pretty) {
        eprintln!("Error: {}", e);
        exit(1);
    }
    eprintln!(
        "All {} files have been concatenated into {}",
        snapshot.files.len(),
        output_path.display()
    );
}
