use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "RENDER_GATEWAY";
const CONFIG_PATH_VAR: &str = "RENDER_GATEWAY_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "config/default";

pub const DEFAULT_FONT_DIR: &str = "/data/fonts";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub fonts: FontConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    /// Directory uploaded fonts are written to and the formatter scans.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Optional `fop.xconf` replacing the generated font configuration.
    #[serde(default)]
    pub config_file: Option<String>,
    /// Optional base directory for resolving relative resource URIs.
    #[serde(default)]
    pub resource_base: Option<String>,
    pub xsltproc: String,
    pub fop: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                max_request_size_mb: 20,
            },
            fonts: FontConfig {
                dir: PathBuf::from(DEFAULT_FONT_DIR),
            },
            engine: EngineConfig {
                config_file: None,
                resource_base: None,
                xsltproc: "xsltproc".to_string(),
                fop: "fop".to_string(),
            },
        }
    }
}

impl Config {
    /// Layers built-in defaults, an optional TOML file and `RENDER_GATEWAY__*`
    /// environment variables, in that order.
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default(
                "server.max_request_size_mb",
                defaults.server.max_request_size_mb as i64,
            )?
            .set_default("fonts.dir", DEFAULT_FONT_DIR)?
            .set_default("engine.xsltproc", defaults.engine.xsltproc)?
            .set_default("engine.fop", defaults.engine.fop)?;

        let file_source = std::env::var(CONFIG_PATH_VAR)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        if Path::new(&format!("{}.toml", file_source)).exists() {
            tracing::debug!("Reading configuration file {}.toml", file_source);
            builder = builder.add_source(config::File::with_name(&file_source));
        }

        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        builder.build()?.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn max_request_bytes(&self) -> usize {
        self.server.max_request_size_mb.saturating_mul(1024 * 1024)
    }
}

impl EngineConfig {
    pub fn config_file(&self) -> Option<PathBuf> {
        non_blank(self.config_file.as_deref()).map(PathBuf::from)
    }

    pub fn resource_base(&self) -> Option<PathBuf> {
        non_blank(self.resource_base.as_deref()).map(PathBuf::from)
    }
}

/// Environment values are often exported empty; treat those as unset.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
