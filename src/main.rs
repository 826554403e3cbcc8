use render_gateway::{
    build_router,
    config::Config,
    engine::{EngineSettings, FopFormatter, XsltprocProcessor},
    pipeline::TransformPipeline,
    state::AppState,
    storage::{FilesystemFontStore, FontStore},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting render gateway...");

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    // Font directory must exist before the first upload or render.
    let font_store = FilesystemFontStore::new(config.fonts.dir.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize font directory: {}", e))?;
    let font_store: Arc<dyn FontStore> = Arc::new(font_store);
    tracing::info!("Font directory ready at {}", config.fonts.dir.display());

    let settings = EngineSettings::from_config(&config.engine, &config.fonts.dir)?;
    match settings.config_file() {
        Some(path) if !path.is_file() => tracing::warn!(
            "Engine configuration file {} does not exist; renders will fail until it does",
            path.display()
        ),
        Some(path) => tracing::info!("Formatter configuration: {}", path.display()),
        None => tracing::info!(
            "Formatter configuration: fonts from {}",
            settings.font_dir().display()
        ),
    }
    tracing::info!("Resource base: {}", settings.resource_base().display());

    let pipeline = TransformPipeline::new(
        Arc::new(XsltprocProcessor::new(config.engine.xsltproc.clone())),
        Arc::new(FopFormatter::new(config.engine.fop.clone())),
        settings,
    );

    let addr = config.bind_address();
    let app = build_router(AppState::new(pipeline, font_store, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Render gateway listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - POST /fonts/upload");
    tracing::info!("  - GET  /fonts");
    tracing::info!("  - POST /render/files");
    tracing::info!("  - POST /render/strings");
    tracing::info!("  - GET  /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,render_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
