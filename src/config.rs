use crate::error::{Result, ScanJsonError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub output: OutputConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    pub path: PathBuf,
    pub key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            pretty: true,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("filenames.json"),
            key: "Nmap".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ScanJsonError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ScanJsonError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ScanJsonError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["scanjson.toml", ".scanjson.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }

        if let Some(ref registry_path) = cli_args.registry_path {
            self.registry.path = registry_path.clone();
        }

        if let Some(ref registry_key) = cli_args.registry_key {
            self.registry.key = registry_key.clone();
        }

        if let Some(pretty) = cli_args.pretty {
            self.output.pretty = pretty;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ScanJsonError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ScanJsonError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.registry.key.is_empty() {
            return Err(ScanJsonError::Config {
                message: "Registry key must not be empty".to_string(),
            });
        }

        if self.registry.path.as_os_str().is_empty() {
            return Err(ScanJsonError::Config {
                message: "Registry path must not be empty".to_string(),
            });
        }

        if self.output.directory.as_os_str().is_empty() {
            return Err(ScanJsonError::Config {
                message: "Output directory must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub registry_path: Option<PathBuf>,
    pub registry_key: Option<String>,
    pub pretty: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_registry_path(mut self, registry_path: Option<PathBuf>) -> Self {
        self.registry_path = registry_path;
        self
    }

    pub fn with_registry_key(mut self, registry_key: Option<String>) -> Self {
        self.registry_key = registry_key;
        self
    }

    pub fn with_pretty(mut self, pretty: Option<bool>) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.directory, PathBuf::from("output"));
        assert_eq!(config.registry.key, "Nmap");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.registry.key.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.registry.key, loaded_config.registry.key);
        assert_eq!(config.output.directory, loaded_config.output.directory);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_output_dir(Some(PathBuf::from("results")))
            .with_registry_key(Some("Masscan".to_string()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.output.directory, PathBuf::from("results"));
        assert_eq!(config.registry.key, "Masscan");
        // Untouched fields keep their defaults.
        assert_eq!(config.registry.path, PathBuf::from("filenames.json"));
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("[output]"));
        assert!(sample.contains("[registry]"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/nonexistent/scanjson.toml");
        assert!(matches!(result, Err(ScanJsonError::Config { .. })));
    }
}
