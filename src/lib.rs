//! HTTP gateway that turns an XML document and an XSLT stylesheet into a PDF.
//!
//! The stylesheet produces XSL-FO, which an external formatter lays out into
//! PDF using the fonts uploaded to the font directory.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod storage;

pub use api::build_router;
pub use crate::config::Config;
pub use error::{Result, ServiceError};
pub use pipeline::{RenderRequest, TransformPipeline};
pub use state::AppState;
