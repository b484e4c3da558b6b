use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::internal::{InternalError, UploadError};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Object storage for uploaded documents
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Store `bytes` under `key` and return the public URL
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, InternalError>;

    /// Delete the object under `key`; a missing object is not an error
    async fn remove(&self, key: &str) -> Result<(), InternalError>;
}

/// Storage key for a business registration document
///
/// `business-docs/<uuid>-<file name>`, with the file name reduced to a safe
/// character set so the key never escapes its prefix.
pub fn business_document_key(file_name: &str) -> String {
    let base = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document.pdf");

    let sanitized: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();

    format!("business-docs/{}-{}", Uuid::new_v4(), sanitized)
}

/// Filesystem-backed storage, served back under `base_url`
pub struct LocalDocumentStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalDocumentStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, InternalError> {
        let relative = Path::new(key);
        let safe = !key.is_empty() && relative.components().all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(UploadError::Rejected(format!("illegal storage key '{}'", key)).into());
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DocumentStorage for LocalDocumentStorage {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, InternalError> {
        let path = self.resolve(key)?;
        let io_error = |source: std::io::Error| UploadError::Io {
            key: key.to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }
        tokio::fs::write(&path, &bytes).await.map_err(io_error)?;

        tracing::info!("Stored {} ({} bytes, {})", key, bytes.len(), content_type);

        Ok(format!("{}/{}", self.base_url, key))
    }

    async fn remove(&self, key: &str) -> Result<(), InternalError> {
        let path = self.resolve(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!("Removed {}", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(UploadError::Io {
                key: key.to_string(),
                source,
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_document_key_shape() {
        let key = business_document_key("../../etc/my license.pdf");

        assert!(key.starts_with("business-docs/"));
        assert!(key.ends_with("-my_license.pdf"));
        assert!(!key.contains(".."));
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(dir.path(), "http://localhost:3000/files/");

        let url = storage
            .upload("business-docs/abc-license.pdf", b"%PDF-1.4".to_vec(), PDF_CONTENT_TYPE)
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/files/business-docs/abc-license.pdf");
        let written = std::fs::read(dir.path().join("business-docs/abc-license.pdf")).unwrap();
        assert_eq!(written, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_upload_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(dir.path(), "http://localhost:3000/files");

        for key in ["../outside.pdf", "/abs.pdf", ""] {
            match storage.upload(key, vec![1], PDF_CONTENT_TYPE).await {
                Err(InternalError::Upload(UploadError::Rejected(_))) => {}
                other => panic!("Expected Rejected for {:?}, got {:?}", key, other),
            }
        }
    }

    #[tokio::test]
    async fn test_remove_deletes_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalDocumentStorage::new(dir.path(), "http://localhost:3000/files");
        storage
            .upload("business-docs/gone.pdf", b"%PDF-1.4".to_vec(), PDF_CONTENT_TYPE)
            .await
            .unwrap();

        storage.remove("business-docs/gone.pdf").await.unwrap();
        assert!(!dir.path().join("business-docs/gone.pdf").exists());

        storage.remove("business-docs/gone.pdf").await.unwrap();
    }
}
