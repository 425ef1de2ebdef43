use clap::{Parser, ValueEnum};
use jsard_common::DiagnosticCategory;
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// CLI arguments for the jsard binary.
#[derive(Parser, Debug)]
#[command(
    name = "jsard",
    version,
    about = "JavaScript Array-Ref Deobfuscator: restores literals hoisted into an obfuscation array"
)]
pub struct CliArgs {
    // ==================== Input / Output ====================
    /// Obfuscated JavaScript file. `-` reads standard input.
    #[arg(short = 'i', long, default_value = "-")]
    pub input: PathBuf,

    /// Where to write the deobfuscated code. `-` writes standard output.
    #[arg(short = 'o', long, default_value = "-")]
    pub output: PathBuf,

    // ==================== Logging ====================
    /// Log level written to standard error.
    #[arg(short = 'v', long, value_enum, default_value_t = Verbosity::Info, ignore_case = true)]
    pub verbosity: Verbosity,

    // ==================== Array Selection ====================
    /// Path to a jsard.json configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only accept an obfuscation array bound to this name.
    #[arg(long = "array-name", alias = "arrayName")]
    pub array_name: Option<String>,

    /// Only accept obfuscation arrays with at least this many elements.
    #[arg(long = "min-elements", alias = "minElements")]
    pub min_elements: Option<usize>,

    /// Rewrite passes allowed before giving up on a non-converging input.
    #[arg(long = "max-passes", alias = "maxPasses")]
    pub max_passes: Option<u32>,

    // ==================== Diagnostics ====================
    /// Color diagnostics. Defaults to on when standard error is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,

    /// How skipped references and errors are reported on standard error.
    #[arg(long = "report-format", value_enum, default_value_t = ReportFormat::Text)]
    pub report_format: ReportFormat,
}

impl CliArgs {
    /// Input file, or `None` for standard input.
    pub fn input_path(&self) -> Option<&Path> {
        stdio_or_path(&self.input)
    }

    /// Output file, or `None` for standard output.
    pub fn output_path(&self) -> Option<&Path> {
        stdio_or_path(&self.output)
    }
}

fn stdio_or_path(path: &Path) -> Option<&Path> {
    if path.as_os_str() == "-" {
        None
    } else {
        Some(path)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Verbosity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    Disabled,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Debug => LevelFilter::DEBUG,
            Verbosity::Info => LevelFilter::INFO,
            Verbosity::Warning => LevelFilter::WARN,
            Verbosity::Error | Verbosity::Critical => LevelFilter::ERROR,
            Verbosity::Disabled => LevelFilter::OFF,
        }
    }

    /// Whether diagnostics of `category` are printed at this verbosity.
    pub fn reports(self, category: DiagnosticCategory) -> bool {
        match category {
            DiagnosticCategory::Error => self != Verbosity::Disabled,
            DiagnosticCategory::Warning => {
                matches!(self, Verbosity::Debug | Verbosity::Info | Verbosity::Warning)
            }
            DiagnosticCategory::Message => matches!(self, Verbosity::Debug | Verbosity::Info),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportFormat {
    /// `file:line:col - warning JSARD2001: message`
    Text,
    /// One JSON diagnostic object per line
    Json,
}
