use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanJsonError {
    #[error("Input not found: {path}")]
    InputNotFound { path: String },

    #[error("Failed to parse XML: {message}")]
    ParseFailure { message: String },

    #[error("No '{key}' entry found in the filenames record")]
    SchemaLookupFailure { key: String },

    #[error("The filenames record is not valid JSON: {message}")]
    RegistryFormat { message: String },

    #[error("The JSON file '{path}' already exists")]
    OutputConflict { path: String },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ScanJsonError {
    fn user_message(&self) -> String {
        match self {
            ScanJsonError::InputNotFound { path } => {
                format!("Input not found: {}", path)
            }
            ScanJsonError::ParseFailure { message } => {
                format!("XML parse failure: {}", message)
            }
            ScanJsonError::SchemaLookupFailure { key } => {
                format!("The filenames record has no '{}' entry", key)
            }
            ScanJsonError::RegistryFormat { message } => {
                format!("Invalid filenames record: {}", message)
            }
            ScanJsonError::OutputConflict { path } => {
                format!("Refusing to overwrite existing JSON file: {}", path)
            }
            ScanJsonError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ScanJsonError::InputNotFound { .. } => Some(
                "Check the path and make sure the scan ran to completion. In text mode, pipe the scan output to stdin instead.".to_string(),
            ),
            ScanJsonError::ParseFailure { .. } => Some(
                "The report must be well-formed XML as produced by nmap -oX. Re-run the scan or pass --mode text for plain output.".to_string(),
            ),
            ScanJsonError::SchemaLookupFailure { .. } => Some(
                "Add an entry for this producer key to the filenames record, or point --registry-key at the right one.".to_string(),
            ),
            ScanJsonError::RegistryFormat { .. } => Some(
                "The filenames record must be a JSON array of single-key objects, each with 'text' and 'json' fields.".to_string(),
            ),
            ScanJsonError::OutputConflict { .. } => Some(
                "Remove the existing file or change the 'json' filename in the filenames record.".to_string(),
            ),
            ScanJsonError::Config { .. } => Some(
                "Check your configuration file syntax and ensure all required fields are present.".to_string(),
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanJsonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = ScanJsonError::OutputConflict {
            path: "output/nmap.json".to_string(),
        };
        assert!(error.user_message().contains("Refusing to overwrite"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = ScanJsonError::from(io_error);
        assert!(matches!(error, ScanJsonError::Io(_)));
        assert!(error.suggestion().is_none());
    }

    #[test]
    fn test_lookup_failure_names_key() {
        let error = ScanJsonError::SchemaLookupFailure {
            key: "Nmap".to_string(),
        };
        assert!(error.to_string().contains("'Nmap'"));
    }
}
