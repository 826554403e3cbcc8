use super::EngineError;
use crate::config::EngineConfig;
use quick_xml::escape::escape;
use std::path::{Path, PathBuf};

/// Immutable formatter settings, built once at startup.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    font_dir: PathBuf,
    resource_base: PathBuf,
    config_file: Option<PathBuf>,
}

/// What one formatter invocation runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatterConfig {
    /// Generated configuration scanning the font directory recursively.
    Inline { font_dir: PathBuf, base: PathBuf },
    /// Operator-supplied configuration file.
    File { path: PathBuf, base: PathBuf },
}

impl EngineSettings {
    /// A missing resource base falls back to the current working directory.
    pub fn new(
        font_dir: impl Into<PathBuf>,
        resource_base: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let absolute = |path: PathBuf| {
            if path.is_relative() {
                cwd.join(path)
            } else {
                path
            }
        };

        Ok(Self {
            font_dir: absolute(font_dir.into()),
            resource_base: absolute(resource_base.unwrap_or_else(|| cwd.clone())),
            config_file,
        })
    }

    pub fn from_config(engine: &EngineConfig, font_dir: &Path) -> std::io::Result<Self> {
        Self::new(font_dir, engine.resource_base(), engine.config_file())
    }

    pub fn font_dir(&self) -> &Path {
        &self.font_dir
    }

    pub fn resource_base(&self) -> &Path {
        &self.resource_base
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Picks the configuration for the next render.
    ///
    /// A configured file that does not exist is an error every time; there is
    /// no fallback to the generated configuration. The resource base must be
    /// an existing directory, since the formatter runs inside it.
    pub async fn resolve(&self) -> Result<FormatterConfig, EngineError> {
        match tokio::fs::metadata(&self.resource_base).await {
            Ok(meta) if meta.is_dir() => {}
            _ => return Err(EngineError::ResourceBaseNotFound(self.resource_base.clone())),
        }
        let base = self.resource_base.clone();

        match &self.config_file {
            Some(path) => match tokio::fs::metadata(path).await {
                Ok(meta) if meta.is_file() => Ok(FormatterConfig::File {
                    path: path.clone(),
                    base,
                }),
                _ => Err(EngineError::ConfigNotFound(path.clone())),
            },
            None => Ok(FormatterConfig::Inline {
                font_dir: self.font_dir.clone(),
                base,
            }),
        }
    }
}

impl FormatterConfig {
    pub fn base(&self) -> &Path {
        match self {
            Self::Inline { base, .. } | Self::File { base, .. } => base,
        }
    }
}

/// Renders the `fop.xconf` used when no configuration file is supplied.
pub fn inline_xconf(font_dir: &Path, base: &Path) -> String {
    let base = base.to_string_lossy();
    let fonts = font_dir.to_string_lossy();

    format!(
        concat!(
            r#"<fop version="1.0">"#,
            "<base>{base}</base>",
            "<renderers>",
            r#"<renderer mime="application/pdf">"#,
            "<fonts>",
            r#"<directory recursive="true">{fonts}</directory>"#,
            "</fonts>",
            "</renderer>",
            "</renderers>",
            "</fop>"
        ),
        base = escape(&*base),
        fonts = escape(&*fonts),
    )
}
