pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod extractor;
pub mod flags;
pub mod persist;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Mode, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, RegistryConfig};
pub use error::{Result, ScanJsonError, UserFriendlyError};

// Core functionality re-exports
pub use encoder::{decode, encode, ChildValue, Element, EncodedDocument, EncodedValue};
pub use extractor::{LineExtractor, PortRecord, ScanRecord};
pub use flags::{load_default_flags, load_selected_flags, SelectedFlag};
pub use persist::{ArtifactNames, ArtifactWriter, FilenamesRecord};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use ui::GracefulShutdown;

/// Result of transcoding an XML report.
#[derive(Debug, Clone)]
pub struct XmlArtifact {
    pub root_tag: String,
    pub json_path: PathBuf,
}

/// Result of processing raw scan text: the extracted record plus both
/// on-disk artifacts.
#[derive(Debug, Clone)]
pub struct TextArtifacts {
    pub record: ScanRecord,
    pub text_path: PathBuf,
    pub json_path: PathBuf,
}

/// Main library interface for ScanJson functionality
pub struct ScanJson {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl ScanJson {
    /// Create a new ScanJson instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    /// Create a new ScanJson instance for testing (no signal handler conflicts)
    #[cfg(test)]
    pub fn new_for_test(config: Config) -> Self {
        let output_formatter = OutputFormatter::new(OutputMode::Plain, 0, true);
        let progress_manager = ProgressManager::new(false);
        let shutdown = GracefulShutdown::new_for_test();

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create a ScanJson instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
    }

    /// Transcode an XML report into a lossless JSON tree artifact.
    ///
    /// Reads from `input`, or stdin when `input` is `None`. The encoded
    /// root is wrapped as `{ "<root_tag>": ... }` before persisting.
    pub fn transcode_xml(&self, input: Option<&Path>) -> Result<XmlArtifact> {
        self.shutdown.check_shutdown()?;
        self.output_formatter.start_operation("Transcoding XML report");

        // Resolve output names first so a registry misconfiguration fails
        // before any parsing work.
        let names = self.resolve_artifact_names()?;
        let xml = self.read_input(input)?;
        self.shutdown.check_shutdown()?;

        let spinner = self.progress_manager.create_spinner("Parsing XML report");
        let parsed = Element::parse(&xml);
        spinner.finish_and_clear();
        let root = parsed?;

        let document = EncodedDocument::from_root(&root);
        self.output_formatter
            .debug(&format!("Encoded document root: <{}>", document.root_tag));
        self.shutdown.check_shutdown()?;

        let writer = self.artifact_writer()?;
        let payload = self.render_json(&document)?;
        let json_path = writer.save_json(&names.json, &payload)?;
        self.output_formatter.artifact_written("json", &json_path);

        Ok(XmlArtifact {
            root_tag: document.root_tag,
            json_path,
        })
    }

    /// Extract structured fields from raw scan text and persist both the
    /// JSON record and the untouched raw input.
    ///
    /// Reads from `input`, or stdin when `input` is `None`. The raw text
    /// artifact is overwritten unconditionally; the JSON record is
    /// non-clobber, like every JSON artifact.
    pub fn process_text(&self, input: Option<&Path>) -> Result<TextArtifacts> {
        self.shutdown.check_shutdown()?;
        self.output_formatter.start_operation("Processing scan output");

        let names = self.resolve_artifact_names()?;
        let raw = self.read_input(input)?;
        self.shutdown.check_shutdown()?;

        let record = LineExtractor::new().extract(&raw);
        self.output_formatter.debug(&format!(
            "Extracted {} port line(s) from {} byte(s) of input",
            record.ports.len(),
            raw.len()
        ));
        self.shutdown.check_shutdown()?;

        let writer = self.artifact_writer()?;
        let text_path = writer.save_text(&names.text, &raw)?;
        self.output_formatter.artifact_written("text", &text_path);

        let payload = self.render_json(&record)?;
        let json_path = writer.save_json(&names.json, &payload)?;
        self.output_formatter.artifact_written("json", &json_path);

        Ok(TextArtifacts {
            record,
            text_path,
            json_path,
        })
    }

    fn resolve_artifact_names(&self) -> Result<ArtifactNames> {
        let record = FilenamesRecord::load(&self.config.registry.path)?;
        record.lookup(&self.config.registry.key)
    }

    fn artifact_writer(&self) -> Result<ArtifactWriter> {
        let writer = ArtifactWriter::new(self.config.output.directory.clone());
        writer.initialize()?;
        Ok(writer)
    }

    fn read_input(&self, input: Option<&Path>) -> Result<String> {
        match input {
            Some(path) => {
                if !path.exists() {
                    return Err(ScanJsonError::InputNotFound {
                        path: path.display().to_string(),
                    });
                }
                Ok(std::fs::read_to_string(path)?)
            }
            None => {
                self.output_formatter.debug("Reading input from stdin");
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }

    fn render_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = if self.config.output.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };

        rendered.map_err(|e| ScanJsonError::Config {
            message: format!("Failed to serialize artifact: {}", e),
        })
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(ScanJsonError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &ScanJsonError) {
        self.progress_manager.clear();
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
