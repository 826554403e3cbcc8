//! The XML + XSLT -> XSL-FO -> PDF sequence shared by both render endpoints.

use crate::engine::{hardening, EngineError, EngineSettings, FoFormatter, XsltProcessor};
use crate::error::Result;
use axum::body::Bytes;
use std::sync::Arc;
use std::time::Instant;

pub const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// One document to render, held in memory for the length of a request.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub xml: Bytes,
    pub xsl: Bytes,
}

pub struct TransformPipeline {
    xslt: Arc<dyn XsltProcessor>,
    formatter: Arc<dyn FoFormatter>,
    settings: EngineSettings,
}

impl TransformPipeline {
    pub fn new(
        xslt: Arc<dyn XsltProcessor>,
        formatter: Arc<dyn FoFormatter>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            xslt,
            formatter,
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Renders one document to PDF bytes.
    ///
    /// Nothing is returned unless every stage succeeds; the output always
    /// starts with the PDF signature.
    pub async fn render(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        let started = Instant::now();

        hardening::check_document("XML input", &request.xml)?;
        hardening::check_stylesheet(&request.xsl)?;

        let fo = self.xslt.transform(&request.xml, &request.xsl).await?;
        hardening::check_document("XSL-FO", &fo)?;
        tracing::debug!(
            "{} produced {} bytes of XSL-FO in {:?}",
            self.xslt.name(),
            fo.len(),
            started.elapsed()
        );

        let config = self.settings.resolve().await?;
        let pdf = self.formatter.format(&fo, &config).await?;

        if !pdf.starts_with(PDF_SIGNATURE) {
            return Err(EngineError::NotPdf.into());
        }

        tracing::info!(
            "Rendered {} bytes of PDF with {} in {:?}",
            pdf.len(),
            self.formatter.name(),
            started.elapsed()
        );

        Ok(pdf)
    }
}
