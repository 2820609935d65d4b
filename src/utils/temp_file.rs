use crate::error::{ProcessingError, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

/// Scratch location for one downloaded upload.
///
/// The directory and everything in it is removed when the value is dropped,
/// so every exit path of a request cleans up after itself.
pub struct TempDownload {
    temp_dir: Option<TempDir>,
    file_path: PathBuf,
}

impl TempDownload {
    pub fn new(file_name: &str) -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix("windrose-")
            .tempdir()
            .map_err(|e| {
                ProcessingError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create temporary directory: {}", e),
                ))
            })?;

        let file_path = temp_dir.path().join(sanitize_file_name(file_name));

        Ok(Self {
            temp_dir: Some(temp_dir),
            file_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn dir_path(&self) -> Option<&Path> {
        self.temp_dir.as_ref().map(|d| d.path())
    }

    /// Remove the directory now and report failures instead of swallowing them.
    pub fn cleanup(&mut self) -> Result<()> {
        if let Some(dir) = self.temp_dir.take() {
            let path = dir.path().to_path_buf();
            dir.close()?;
            debug!(path = %path.display(), "removed temporary download");
        }
        Ok(())
    }
}

impl Drop for TempDownload {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            warn!("Failed to cleanup temporary download: {}", e);
        }
    }
}

/// Keep only the final path component so a user-supplied name cannot escape the directory.
fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    if name.is_empty() || name == ".." {
        "upload.csv".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_on_drop() -> Result<()> {
        let download = TempDownload::new("data.csv")?;
        std::fs::write(download.path(), b"DD;Ff\n")?;
        let dir = download.dir_path().map(Path::to_path_buf);
        assert!(download.path().exists());

        drop(download);
        assert!(!dir.unwrap().exists());
        Ok(())
    }

    #[test]
    fn test_explicit_cleanup_is_idempotent() -> Result<()> {
        let mut download = TempDownload::new("data.csv")?;
        download.cleanup()?;
        download.cleanup()?;
        assert!(download.dir_path().is_none());
        Ok(())
    }

    #[test]
    fn test_file_name_is_sanitized() -> Result<()> {
        let download = TempDownload::new("../../etc/passwd.csv")?;
        assert_eq!(
            download.path().file_name().and_then(|n| n.to_str()),
            Some("passwd.csv")
        );
        assert_eq!(sanitize_file_name(""), "upload.csv");
        assert_eq!(sanitize_file_name(".."), "upload.csv");
        Ok(())
    }
}
