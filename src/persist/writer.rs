use crate::error::{Result, ScanJsonError};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes artifacts into the output directory.
///
/// The two save paths carry different overwrite policies on purpose: the
/// JSON artifact is never clobbered, the raw text artifact always is.
/// That asymmetry is inherited behavior and part of the contract.
pub struct ArtifactWriter {
    directory: PathBuf,
}

impl ArtifactWriter {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Create the output directory, parents included. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.directory).map_err(ScanJsonError::Io)?;
        Ok(())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write the JSON artifact, failing if the target already exists.
    ///
    /// The existence check is the only coordination between concurrent
    /// invocations targeting the same path; a loser of the race fails the
    /// same way a later run would.
    pub fn save_json(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.directory.join(filename);
        if path.exists() {
            return Err(ScanJsonError::OutputConflict {
                path: path.display().to_string(),
            });
        }

        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write the raw text artifact, overwriting unconditionally.
    pub fn save_text(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.directory.join(filename);
        fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn writer_in(temp: &TempDir) -> ArtifactWriter {
        let writer = ArtifactWriter::new(temp.path().join("output"));
        writer.initialize().unwrap();
        writer
    }

    #[test]
    fn test_initialize_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp.path().join("a").join("b"));
        writer.initialize().unwrap();
        assert!(writer.directory().is_dir());

        // A second initialize is a no-op, not an error.
        writer.initialize().unwrap();
    }

    #[test]
    fn test_save_json_writes_content() {
        let temp = TempDir::new().unwrap();
        let writer = writer_in(&temp);
        let path = writer.save_json("scan.json", "{\"ok\":true}").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "{\"ok\":true}");
    }

    #[test]
    fn test_save_json_never_clobbers() {
        let temp = TempDir::new().unwrap();
        let writer = writer_in(&temp);
        writer.save_json("scan.json", "first").unwrap();

        let result = writer.save_json("scan.json", "second");
        assert!(matches!(result, Err(ScanJsonError::OutputConflict { .. })));

        // The first file's contents are untouched.
        let content = fs::read_to_string(writer.directory().join("scan.json")).unwrap();
        assert_eq!(content, "first");
    }

    #[test]
    fn test_save_text_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let writer = writer_in(&temp);
        writer.save_text("scan.txt", "first").unwrap();
        writer.save_text("scan.txt", "second").unwrap();

        let content = fs::read_to_string(writer.directory().join("scan.txt")).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_save_without_directory_is_io_failure() {
        let temp = TempDir::new().unwrap();
        let writer = ArtifactWriter::new(temp.path().join("missing"));
        let result = writer.save_text("scan.txt", "content");
        assert!(matches!(result, Err(ScanJsonError::Io(_))));
    }
}
