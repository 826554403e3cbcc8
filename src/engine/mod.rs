//! External engines the gateway delegates to.
//!
//! Rendering happens in two stages, each behind its own trait:
//!
//! - [`XsltProcessor`]: XML + XSLT stylesheet -> XSL-FO
//! - [`FoFormatter`]: XSL-FO + fonts -> PDF
//!
//! The shipped implementations drive `xsltproc` and Apache FOP as child
//! processes. Inputs are vetted by [`hardening`] before either stage runs.

pub mod formatter;
pub mod hardening;
pub mod settings;
pub mod xslt;

pub use formatter::FopFormatter;
pub use settings::{EngineSettings, FormatterConfig};
pub use xslt::XsltprocProcessor;

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Output;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{0}")]
    Malformed(String),

    #[error("Blocked by input policy: {0}")]
    Hardening(String),

    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' failed: {message}")]
    Process { program: String, message: String },

    #[error("Engine configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Resource base directory not found: {}", .0.display())]
    ResourceBaseNotFound(PathBuf),

    #[error("Formatter output is not a PDF document")]
    NotPdf,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Applies an XSLT stylesheet to an XML document.
#[async_trait]
pub trait XsltProcessor: Send + Sync {
    /// Returns the serialized result tree (the XSL-FO document).
    async fn transform(&self, xml: &[u8], stylesheet: &[u8]) -> Result<Vec<u8>, EngineError>;

    fn name(&self) -> &'static str;
}

/// Lays out an XSL-FO document into PDF bytes.
#[async_trait]
pub trait FoFormatter: Send + Sync {
    async fn format(&self, fo: &[u8], config: &FormatterConfig) -> Result<Vec<u8>, EngineError>;

    fn name(&self) -> &'static str;
}

/// Creates a private scratch directory without blocking the runtime.
pub(crate) async fn scratch_dir(
    prefix: &'static str,
) -> Result<tempfile::TempDir, EngineError> {
    tokio::task::spawn_blocking(move || tempfile::Builder::new().prefix(prefix).tempdir())
        .await
        .map_err(|e| EngineError::Io(std::io::Error::other(e)))?
        .map_err(EngineError::from)
}

/// Builds the error for a child process that exited unsuccessfully.
pub(crate) fn process_failure(program: &str, output: &Output) -> EngineError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();

    let message = if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        stderr.to_string()
    };

    EngineError::Process {
        program: program.to_string(),
        message,
    }
}
