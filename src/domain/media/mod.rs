//! Uploaded files and the storage port they are written through.

use async_trait::async_trait;

use crate::support::errors::AppResult;

/// A file received in a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied name; only its extension is kept.
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Persist `file` under `directory` and return its storage name.
    async fn save(&self, directory: &str, file: &UploadedFile) -> AppResult<String>;

    /// Remove a stored file. Missing files are not an error.
    async fn delete(&self, name: &str) -> AppResult<()>;

    /// Site-relative URL a stored file is served from.
    fn url(&self, name: &str) -> String;
}
