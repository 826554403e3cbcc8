use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid font file name '{0}'")]
    InvalidName(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Where uploaded fonts live between renders.
#[async_trait]
pub trait FontStore: Send + Sync {
    /// Writes a font under an already sanitized name, replacing any previous
    /// file of that name. Returns the stored path.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError>;

    /// Names of the fonts currently stored, sorted.
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Directory the formatter scans for fonts.
    fn root(&self) -> &Path;
}
