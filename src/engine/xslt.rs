use super::{process_failure, scratch_dir, EngineError, XsltProcessor};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Keeps libxslt from touching the network, loading DTDs or writing files.
const SANDBOX_FLAGS: [&str; 4] = ["--nonet", "--novalid", "--nowrite", "--nomkdir"];

/// Runs libxslt's `xsltproc` command for each transformation.
#[derive(Debug, Clone)]
pub struct XsltprocProcessor {
    program: String,
}

impl XsltprocProcessor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for XsltprocProcessor {
    fn default() -> Self {
        Self::new("xsltproc")
    }
}

#[async_trait]
impl XsltProcessor for XsltprocProcessor {
    async fn transform(&self, xml: &[u8], stylesheet: &[u8]) -> Result<Vec<u8>, EngineError> {
        let workdir = scratch_dir("xslt-").await?;
        let stylesheet_path = workdir.path().join("stylesheet.xsl");
        let input_path = workdir.path().join("input.xml");

        tokio::fs::write(&stylesheet_path, stylesheet).await?;
        tokio::fs::write(&input_path, xml).await?;

        let output = Command::new(&self.program)
            .args(SANDBOX_FLAGS)
            .arg(&stylesheet_path)
            .arg(&input_path)
            .current_dir(workdir.path())
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

        tracing::debug!(
            "{} produced {} bytes of XSL-FO",
            self.program,
            output.stdout.len()
        );

        Ok(output.stdout)
    }

    fn name(&self) -> &'static str {
        "xsltproc"
    }
}
