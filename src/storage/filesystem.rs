//! Flat font directory on the local filesystem.
//!
//! Uploaded names are reduced to their final path segment before they reach
//! the disk, so a name like `../../etc/passwd` lands as `passwd` inside the
//! store and never outside it.

use crate::storage::backend::{FontStore, StorageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub struct FilesystemFontStore {
    base_path: PathBuf,
}

impl FilesystemFontStore {
    /// Opens the store, creating the directory if it does not exist yet.
    pub async fn new(base_path: PathBuf) -> Result<Self, StorageError> {
        tokio::fs::create_dir_all(&base_path).await?;
        Ok(Self { base_path })
    }

    fn file_path(&self, file_name: &str) -> Result<PathBuf, StorageError> {
        match sanitize_file_name(file_name) {
            Some(name) if name == file_name => Ok(self.base_path.join(name)),
            _ => Err(StorageError::InvalidName(file_name.to_string())),
        }
    }
}

#[async_trait]
impl FontStore for FilesystemFontStore {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.file_path(file_name)?;
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!("Stored font {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(&self.base_path).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file()
                && let Some(name) = entry.file_name().to_str()
            {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn root(&self) -> &Path {
        &self.base_path
    }
}

/// Reduces an uploaded file name to its final path segment.
///
/// Both `/` and `\` count as separators. Returns `None` when nothing usable
/// is left: empty names, `.`/`..`, or names with control characters.
pub fn sanitize_file_name(original: &str) -> Option<&str> {
    let name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." || name.chars().any(char::is_control) {
        return None;
    }

    Some(name)
}
