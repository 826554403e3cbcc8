#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use render_gateway::{
    build_router,
    config::Config,
    engine::{EngineError, EngineSettings, FoFormatter, FormatterConfig, XsltProcessor},
    state::AppState,
    storage::{FilesystemFontStore, FontStore, StorageError},
    TransformPipeline,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "render-gateway-test-boundary";

/// Stands in for xsltproc: emits an FO document derived from both inputs.
pub struct FakeXslt;

#[async_trait]
impl XsltProcessor for FakeXslt {
    async fn transform(&self, xml: &[u8], stylesheet: &[u8]) -> Result<Vec<u8>, EngineError> {
        let checksum = |bytes: &[u8]| bytes.iter().map(|b| *b as u64).sum::<u64>();
        Ok(format!(
            r#"<fo:root xmlns:fo="http://www.w3.org/1999/XSL/Format"><fo:block>{}:{}:{}:{}</fo:block></fo:root>"#,
            xml.len(),
            checksum(xml),
            stylesheet.len(),
            checksum(stylesheet)
        )
        .into_bytes())
    }

    fn name(&self) -> &'static str {
        "fake-xslt"
    }
}

/// Stands in for FOP: wraps the FO document behind a PDF header.
pub struct FakeFormatter;

#[async_trait]
impl FoFormatter for FakeFormatter {
    async fn format(&self, fo: &[u8], _config: &FormatterConfig) -> Result<Vec<u8>, EngineError> {
        let mut pdf = b"%PDF-1.7\n%".to_vec();
        pdf.extend_from_slice(fo);
        pdf.extend_from_slice(b"\n%%EOF\n");
        Ok(pdf)
    }

    fn name(&self) -> &'static str {
        "fake-fop"
    }
}

/// A font store whose disk is always full.
pub struct FailingFontStore {
    pub root: PathBuf,
}

#[async_trait]
impl FontStore for FailingFontStore {
    async fn store(&self, _file_name: &str, _bytes: &[u8]) -> Result<PathBuf, StorageError> {
        Err(std::io::Error::other("No space left on device").into())
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(Vec::new())
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

/// Router wired to fake engines and a scratch font directory.
pub struct TestApp {
    pub router: Router,
    pub scratch: TempDir,
    pub font_dir: PathBuf,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::build(None, None, None).await
    }

    pub async fn with_config_file(path: PathBuf) -> Self {
        Self::build(Some(path), None, None).await
    }

    pub async fn with_resource_base(path: PathBuf) -> Self {
        Self::build(None, Some(path), None).await
    }

    pub async fn with_font_store(store: Arc<dyn FontStore>) -> Self {
        Self::build(None, None, Some(store)).await
    }

    async fn build(
        config_file: Option<PathBuf>,
        resource_base: Option<PathBuf>,
        store: Option<Arc<dyn FontStore>>,
    ) -> Self {
        let scratch = TempDir::new().unwrap();
        let font_dir = scratch.path().join("fonts");

        let mut config = Config::default();
        config.fonts.dir = font_dir.clone();

        let font_store = match store {
            Some(store) => store,
            None => Arc::new(FilesystemFontStore::new(font_dir.clone()).await.unwrap()),
        };

        let resource_base = resource_base.unwrap_or_else(|| scratch.path().to_path_buf());
        let settings = EngineSettings::new(&font_dir, Some(resource_base), config_file).unwrap();
        let pipeline = TransformPipeline::new(Arc::new(FakeXslt), Arc::new(FakeFormatter), settings);

        let router = build_router(AppState::new(pipeline, font_store, config));

        Self {
            router,
            scratch,
            font_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>, Option<String>) {
        let response: Response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec(), content_type)
    }

    pub fn stored_fonts(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.font_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// One part of a multipart/form-data body.
pub enum Part<'a> {
    File {
        name: &'a str,
        file_name: Option<&'a str>,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                bytes,
            } => {
                let disposition = match file_name {
                    Some(file_name) => format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                    ),
                    None => format!("Content-Disposition: form-data; name=\"{name}\"\r\n"),
                };
                body.extend_from_slice(disposition.as_bytes());
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    raw_multipart_request(uri, multipart_body(parts))
}

pub fn raw_multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn font(file_name: &'static str, bytes: &'static [u8]) -> Part<'static> {
    Part::File {
        name: "fonts",
        file_name: Some(file_name),
        bytes,
    }
}

pub fn render_files_request(xml: &str, xsl: &str) -> Request<Body> {
    multipart_request(
        "/render/files",
        &[
            Part::File {
                name: "xml",
                file_name: Some("input.xml"),
                bytes: xml.as_bytes(),
            },
            Part::File {
                name: "xsl",
                file_name: Some("style.xsl"),
                bytes: xsl.as_bytes(),
            },
        ],
    )
}

pub fn render_strings_request(xml: &str, xsl: &str) -> Request<Body> {
    multipart_request(
        "/render/strings",
        &[
            Part::Text {
                name: "xml",
                value: xml,
            },
            Part::Text {
                name: "xsl",
                value: xsl,
            },
        ],
    )
}
