//! Object storage for uploaded images
//!
//! Objects are content addressed: `{folder}/{sha256}.{ext}`. Uploading the
//! same bytes twice yields the same URL.

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One file taken out of a multipart body
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Lowercased extension of the original file name
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    pub fn sha256_hex(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }

    /// `{folder}/{hash}.{ext}`
    pub fn object_key(&self, folder: &str) -> Result<String, StorageError> {
        if folder.is_empty() || !folder.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(StorageError::InvalidKey(folder.to_string()));
        }
        let ext = self
            .extension()
            .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "bin".into());
        Ok(format!("{folder}/{}.{ext}", self.sha256_hex()))
    }

    fn mime(&self) -> String {
        self.content_type.clone().unwrap_or_else(|| {
            mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .to_string()
        })
    }
}

/// Stores a file and returns the URL clients use to fetch it
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, folder: &str, file: &UploadedFile) -> Result<String, StorageError>;
}

pub struct S3Store {
    client: S3Client,
    bucket: String,
    public_base_url: String,
}

impl S3Store {
    pub fn new(client: S3Client, bucket: impl Into<String>, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, folder: &str, file: &UploadedFile) -> Result<String, StorageError> {
        let key = file.object_key(folder)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(file.bytes.clone().into())
            .content_type(file.mime())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "S3 upload failed");
                StorageError::Upload(e.to_string())
            })?;

        tracing::info!(key = %key, size = file.bytes.len(), "Object uploaded to S3");
        Ok(format!("{}/{key}", self.public_base_url.trim_end_matches('/')))
    }
}

/// Filesystem store, served by the HTTP layer under its public base URL
pub struct LocalStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(&self, folder: &str, file: &UploadedFile) -> Result<String, StorageError> {
        let key = file.object_key(folder)?;
        let path = self.root.join(&key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &file.bytes).await?;

        tracing::debug!(path = %path.display(), "Object written to local store");
        Ok(format!("{}/{key}", self.public_base_url.trim_end_matches('/')))
    }
}
