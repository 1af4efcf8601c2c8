use crate::domain::ports::Storage;
use crate::utils::error::{ApollonatorError, Result};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);
        let display = full_path.display().to_string();
        let to_output_error = |source| ApollonatorError::OutputError {
            path: display.clone(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(to_output_error)?;
            }
        }

        tokio::fs::write(&full_path, data)
            .await
            .map_err(to_output_error)?;
        Ok(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        let written = storage
            .write_file("reports/acme.csv", b"FirstName\n")
            .await
            .unwrap();

        assert!(written.ends_with("acme.csv"));
        let data = std::fs::read(temp_dir.path().join("reports/acme.csv")).unwrap();
        assert_eq!(data, b"FirstName\n");
    }

    #[tokio::test]
    async fn test_write_file_reports_output_error() {
        let temp_dir = TempDir::new().unwrap();
        // 以檔案當作目錄，必定失敗
        std::fs::write(temp_dir.path().join("blocker"), b"x").unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());

        let err = storage
            .write_file("blocker/out.xlsx", b"data")
            .await
            .unwrap_err();
        assert!(matches!(err, ApollonatorError::OutputError { .. }));
    }
}
