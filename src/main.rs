use daybook::config::Settings;
use daybook::domain::schemas::SchemaRegistry;
use daybook::persistence::create_document_store;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Daybook on {}", settings.bind_address());

    let schemas = Arc::new(SchemaRegistry::with_overrides(&settings.schemas)?);
    let store = create_document_store(&settings).await?;

    // Create application using the library function
    let app = daybook::create_app(store, schemas);

    // Start server
    let addr: SocketAddr = settings.bind_address().parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
