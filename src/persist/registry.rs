use crate::error::{Result, ScanJsonError};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Output filenames registered for one producer.
///
/// The registry may carry more fields per producer (the original records a
/// `config` path, for example); only `text` and `json` matter here and
/// extras are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactNames {
    pub text: String,
    pub json: String,
}

/// The externally maintained filenames record.
///
/// On disk it is an ordered JSON array of single-key objects, each mapping
/// a producer key to its filename fields. The record is owned by the
/// surrounding toolchain; this side only reads it and fails loudly when
/// the expected entry is missing.
#[derive(Debug, Clone)]
pub struct FilenamesRecord {
    entries: Vec<Map<String, Value>>,
}

impl FilenamesRecord {
    /// Load the record from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScanJsonError::InputNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse the record from its JSON text.
    ///
    /// A bare object is accepted as a one-entry record, matching the
    /// tolerance of the original loader.
    pub fn parse(content: &str) -> Result<Self> {
        if let Ok(entries) = serde_json::from_str::<Vec<Map<String, Value>>>(content) {
            return Ok(Self { entries });
        }

        match serde_json::from_str::<Map<String, Value>>(content) {
            Ok(single) => Ok(Self {
                entries: vec![single],
            }),
            Err(e) => Err(ScanJsonError::RegistryFormat {
                message: e.to_string(),
            }),
        }
    }

    /// Resolve the filenames registered under `key`.
    ///
    /// Entries are searched in record order and the first one carrying the
    /// key wins. A present entry with a malformed value is a format error,
    /// not a lookup failure.
    pub fn lookup(&self, key: &str) -> Result<ArtifactNames> {
        for entry in &self.entries {
            if let Some(value) = entry.get(key) {
                return serde_json::from_value(value.clone()).map_err(|e| {
                    ScanJsonError::RegistryFormat {
                        message: format!("entry '{}': {}", key, e),
                    }
                });
            }
        }

        Err(ScanJsonError::SchemaLookupFailure {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RECORD: &str = r#"[
        {"Gobuster": {"text": "gobuster.txt", "json": "gobuster.json"}},
        {"Nmap": {"text": "nmap_text.txt", "json": "nmap_json.json", "config": "nmap.toml"}}
    ]"#;

    #[test]
    fn test_lookup_finds_entry() {
        let record = FilenamesRecord::parse(RECORD).unwrap();
        let names = record.lookup("Nmap").unwrap();
        assert_eq!(names.text, "nmap_text.txt");
        assert_eq!(names.json, "nmap_json.json");
    }

    #[test]
    fn test_missing_key_is_lookup_failure() {
        let record = FilenamesRecord::parse(RECORD).unwrap();
        let result = record.lookup("Nikto");
        assert!(matches!(
            result,
            Err(ScanJsonError::SchemaLookupFailure { key }) if key == "Nikto"
        ));
    }

    #[test]
    fn test_first_entry_wins_for_duplicate_keys() {
        let record = FilenamesRecord::parse(
            r#"[
                {"Nmap": {"text": "first.txt", "json": "first.json"}},
                {"Nmap": {"text": "second.txt", "json": "second.json"}}
            ]"#,
        )
        .unwrap();
        assert_eq!(record.lookup("Nmap").unwrap().text, "first.txt");
    }

    #[test]
    fn test_bare_object_accepted() {
        let record =
            FilenamesRecord::parse(r#"{"Nmap": {"text": "t.txt", "json": "j.json"}}"#).unwrap();
        assert_eq!(record.lookup("Nmap").unwrap().json, "j.json");
    }

    #[test]
    fn test_invalid_json_is_format_error() {
        let result = FilenamesRecord::parse("not json at all");
        assert!(matches!(result, Err(ScanJsonError::RegistryFormat { .. })));
    }

    #[test]
    fn test_malformed_entry_is_format_error() {
        let record = FilenamesRecord::parse(r#"[{"Nmap": {"text": "only-text.txt"}}]"#).unwrap();
        let result = record.lookup("Nmap");
        assert!(matches!(result, Err(ScanJsonError::RegistryFormat { .. })));
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let result = FilenamesRecord::load("/nonexistent/filenames.json");
        assert!(matches!(result, Err(ScanJsonError::InputNotFound { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(RECORD.as_bytes()).unwrap();
        let record = FilenamesRecord::load(file.path()).unwrap();
        assert!(record.lookup("Gobuster").is_ok());
    }
}
