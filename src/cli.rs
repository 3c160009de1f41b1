use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scanjson")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert Nmap scan output into structured JSON artifacts")]
#[command(
    long_about = "ScanJson reads an Nmap XML report or raw scan output and writes \
                       lossless JSON artifacts into the output directory, with filenames \
                       resolved through the shared filenames record."
)]
#[command(after_help = "EXAMPLES:\n  \
    scanjson output/nmap_xml.xml\n  \
    scanjson scan.xml --output-dir results --verbose\n  \
    nmap -sV 10.0.0.1 | scanjson --mode text\n  \
    scanjson scan.xml --registry filenames.json --registry-key Nmap\n\n\
    For more information, visit: https://github.com/user/scanjson")]
pub struct Cli {
    /// Input file (XML report, or raw scan text; stdin when omitted)
    pub input: Option<PathBuf>,

    /// How to interpret the input
    #[arg(short, long, value_enum, default_value_t = Mode::Xml)]
    pub mode: Mode,

    /// Output directory for artifacts (defaults to 'output')
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Path to the filenames record
    #[arg(short, long, help = "Path to the filenames record JSON")]
    pub registry: Option<PathBuf>,

    /// Producer key to look up in the filenames record
    #[arg(long, help = "Producer key in the filenames record (default: Nmap)")]
    pub registry_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for terminal messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Emit compact JSON artifacts instead of pretty-printed ones
    #[arg(long)]
    pub compact: bool,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate a sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Transcode an XML report into a lossless JSON tree
    Xml,
    /// Extract ports, service info, and summary from raw text
    Text,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_dir(self.output_dir.clone())
            .with_registry_path(self.registry.clone())
            .with_registry_key(self.registry_key.clone())
            .with_pretty(self.compact.then_some(false))
    }

    pub fn should_use_colors(&self) -> bool {
        !self.quiet && console::Term::stdout().features().colors_supported()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
