pub mod fonts;
pub mod health;
pub mod render;

pub use fonts::{list_fonts, upload_fonts};
pub use health::health_check;
pub use render::{render_files, render_strings};

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Builds the HTTP surface of the gateway.
///
/// # Routes
///
/// - `POST /fonts/upload` - store fonts (`fonts` parts)
/// - `GET  /fonts` - list stored fonts
/// - `POST /render/files` - render from `xml` and `xsl` file parts
/// - `POST /render/strings` - render from `xml` and `xsl` text fields
/// - `GET  /health`
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_request_bytes();

    Router::new()
        .route("/health", get(health_check))
        .route("/fonts", get(list_fonts))
        .route("/fonts/upload", post(upload_fonts))
        .route("/render/files", post(render_files))
        .route("/render/strings", post(render_strings))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
