use super::settings::inline_xconf;
use super::{process_failure, scratch_dir, EngineError, FoFormatter, FormatterConfig};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Runs Apache FOP's `fop` command for each document.
#[derive(Debug, Clone)]
pub struct FopFormatter {
    program: String,
}

impl FopFormatter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FopFormatter {
    fn default() -> Self {
        Self::new("fop")
    }
}

#[async_trait]
impl FoFormatter for FopFormatter {
    async fn format(&self, fo: &[u8], config: &FormatterConfig) -> Result<Vec<u8>, EngineError> {
        let workdir = scratch_dir("fop-").await?;
        let fo_path = workdir.path().join("document.fo");
        let pdf_path = workdir.path().join("document.pdf");

        tokio::fs::write(&fo_path, fo).await?;

        let conf_path = match config {
            FormatterConfig::File { path, .. } => path.clone(),
            FormatterConfig::Inline { font_dir, base } => {
                let path = workdir.path().join("fop.xconf");
                tokio::fs::write(&path, inline_xconf(font_dir, base)).await?;
                path
            }
        };

        // Relative URIs in the document resolve against the working directory.
        let output = Command::new(&self.program)
            .arg("-q")
            .arg("-c")
            .arg(&conf_path)
            .arg("-fo")
            .arg(&fo_path)
            .arg("-pdf")
            .arg(&pdf_path)
            .current_dir(config.base())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| EngineError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(process_failure(&self.program, &output));
        }

        let pdf = tokio::fs::read(&pdf_path)
            .await
            .map_err(|e| EngineError::Process {
                program: self.program.clone(),
                message: format!("no PDF written: {e}"),
            })?;

        tracing::debug!("{} produced {} bytes of PDF", self.program, pdf.len());

        Ok(pdf)
    }

    fn name(&self) -> &'static str {
        "fop"
    }
}
