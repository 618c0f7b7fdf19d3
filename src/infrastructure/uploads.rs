//! Property image storage on the local filesystem
//!
//! Files live under `<upload dir>/properties/<property id>/<uuid>.<ext>`.
//! Only the generated file name is persisted; the client's original name is
//! kept as metadata and never used as a path.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::domain::{DomainError, DomainResult};

/// Limits applied to every upload
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub max_files: usize,
}

impl From<&UploadConfig> for UploadPolicy {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_file_size: config.max_file_size,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            max_files: config.max_files,
        }
    }
}

impl UploadPolicy {
    /// Validate one file and return its normalized extension.
    pub fn check(&self, original_name: &str, size: usize) -> DomainResult<String> {
        if size == 0 {
            return Err(DomainError::Validation(format!("File '{}' is empty", original_name)));
        }
        if size > self.max_file_size {
            return Err(DomainError::Validation(format!(
                "File '{}' exceeds the {} byte limit",
                original_name, self.max_file_size
            )));
        }

        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !self.allowed_extensions.iter().any(|a| *a == extension) {
            return Err(DomainError::Validation(format!(
                "File type '{}' is not allowed (allowed: {})",
                extension,
                self.allowed_extensions.join(", ")
            )));
        }
        Ok(extension)
    }
}

/// Filesystem-backed image store
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn property_dir(&self, property_id: i32) -> PathBuf {
        self.root.join("properties").join(property_id.to_string())
    }

    /// Write `bytes` and return the generated file name.
    pub async fn save(&self, property_id: i32, extension: &str, bytes: &[u8]) -> DomainResult<String> {
        let dir = self.property_dir(property_id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to create upload dir: {}", e)))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        fs::write(dir.join(&file_name), bytes)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to store upload: {}", e)))?;

        debug!(property_id, file_name = %file_name, size = bytes.len(), "Image stored");
        Ok(file_name)
    }

    /// Delete a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, property_id: i32, file_name: &str) {
        let path = self.property_dir(property_id).join(file_name);
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "Failed to remove image file");
            }
        }
    }

    /// Public URL path of a stored file
    pub fn url_of(property_id: i32, file_name: &str) -> String {
        format!("/uploads/properties/{}/{}", property_id, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> UploadPolicy {
        UploadPolicy::from(&UploadConfig {
            dir: PathBuf::from("unused"),
            max_file_size: 10,
            allowed_extensions: vec![".PNG".into(), "jpg".into()],
            max_files: 2,
        })
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert_eq!(policy().check("photo.JPG", 5).unwrap(), "jpg");
        assert_eq!(policy().check("plan.png", 5).unwrap(), "png");
    }

    #[test]
    fn disallowed_or_missing_extension_is_rejected() {
        assert!(policy().check("script.sh", 5).is_err());
        assert!(policy().check("noext", 5).is_err());
    }

    #[test]
    fn size_limits_are_enforced() {
        assert!(policy().check("photo.jpg", 0).is_err());
        assert!(policy().check("photo.jpg", 11).is_err());
        assert!(policy().check("photo.jpg", 10).is_ok());
    }

    #[tokio::test]
    async fn save_then_remove() {
        let root = std::env::temp_dir().join(format!("propshare-test-{}", Uuid::new_v4()));
        let store = ImageStore::new(&root);

        let name = store.save(3, "png", b"fake").await.unwrap();
        let path = root.join("properties").join("3").join(&name);
        assert!(path.exists());
        assert!(name.ends_with(".png"));

        store.remove(3, &name).await;
        assert!(!path.exists());
        store.remove(3, &name).await;

        let _ = std::fs::remove_dir_all(root);
    }
}
