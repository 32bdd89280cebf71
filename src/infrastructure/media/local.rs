//! Media files on the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{MediaStorage, UploadedFile};
use crate::support::errors::{AppResult, InfraError};

/// Stores files below `root` and serves them from `url_prefix`.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let prefix = url_prefix.into();
        let url_prefix = format!("/{}/", prefix.trim_matches('/'));
        Self {
            root: root.into(),
            url_prefix,
        }
    }

    fn path_of(&self, name: &str) -> AppResult<PathBuf> {
        let relative = Path::new(name);
        let traverses = relative
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)));
        if traverses || name.is_empty() {
            return Err(InfraError::Storage(format!("invalid media name '{}'", name)).into());
        }
        Ok(self.root.join(relative))
    }
}

/// Keep a short alphanumeric extension from the client file name.
fn extension_of(file_name: Option<&str>) -> Option<String> {
    let ext = Path::new(file_name?).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn save(&self, directory: &str, file: &UploadedFile) -> AppResult<String> {
        let stem = uuid::Uuid::new_v4().simple().to_string();
        let file_name = match extension_of(file.file_name.as_deref()) {
            Some(ext) => format!("{}.{}", stem, ext),
            None => stem,
        };
        let name = format!("{}/{}", directory.trim_matches('/'), file_name);
        let path = self.path_of(&name)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| InfraError::Storage(e.to_string()))?;
        }
        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|e| InfraError::Storage(e.to_string()))?;

        debug!(media = %name, size = file.bytes.len(), "Stored uploaded file");
        Ok(name)
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.path_of(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfraError::Storage(e.to_string()).into()),
        }
    }

    fn url(&self, name: &str) -> String {
        format!("{}{}", self.url_prefix, name.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.to_string()),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[tokio::test]
    async fn save_writes_file_under_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path(), "media");

        let name = storage.save("avatars", &upload("me.PNG")).await.unwrap();

        assert!(name.starts_with("avatars/"));
        assert!(name.ends_with(".png"));
        let written = std::fs::read(dir.path().join(&name)).unwrap();
        assert_eq!(written, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn suspicious_extensions_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path(), "/media/");

        let name = storage.save("avatars", &upload("x.p/ng")).await.unwrap();
        assert!(!name.contains('.'));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path(), "media");
        let name = storage.save("avatars", &upload("a.jpg")).await.unwrap();

        storage.delete(&name).await.unwrap();
        storage.delete(&name).await.unwrap();
        assert!(!dir.path().join(&name).exists());
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path(), "media");
        assert!(storage.delete("../etc/passwd").await.is_err());
        assert!(storage.delete("/etc/passwd").await.is_err());
    }

    #[test]
    fn url_joins_prefix_and_name() {
        let storage = LocalMediaStorage::new("/tmp", "media/");
        assert_eq!(storage.url("avatars/a.png"), "/media/avatars/a.png");
    }
}
