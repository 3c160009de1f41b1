use clap::Parser;
use scanjson::{Cli, Mode, ScanJson, ScanJsonError, UserFriendlyError};
use std::process;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let scanjson = match ScanJson::from_cli(&cli) {
        Ok(scanjson) => scanjson,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let input = cli.input.as_deref();
    let result = match cli.mode {
        Mode::Xml => scanjson.transcode_xml(input).map(|_| ()),
        Mode::Text => scanjson.process_text(input).map(|_| ()),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            scanjson.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &ScanJsonError) -> i32 {
    match error {
        ScanJsonError::Cancelled => 130, // Interrupted (SIGINT)
        ScanJsonError::InputNotFound { .. } => 2,
        ScanJsonError::ParseFailure { .. } => 3,
        ScanJsonError::SchemaLookupFailure { .. } => 4,
        ScanJsonError::RegistryFormat { .. } => 5,
        ScanJsonError::OutputConflict { .. } => 6,
        ScanJsonError::Config { .. } => 7,
        _ => 1, // General error
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "scanjson.toml".to_string());

    match ScanJson::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  scanjson <scan.xml> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &ScanJsonError) {
    use scanjson::{OutputFormatter, OutputMode};

    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
