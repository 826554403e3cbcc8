pub mod backend;
pub mod filesystem;

pub use backend::{FontStore, StorageError};
pub use filesystem::{sanitize_file_name, FilesystemFontStore};
