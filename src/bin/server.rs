use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dbpedia_explorer::{
    api::{self, AppState},
    Explorer, Settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "explorer_server=debug,dbpedia_explorer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env();

    tracing::info!("🚀 Starting {}", settings.project_name);
    tracing::info!("📚 SPARQL endpoint: {}", settings.dbpedia_endpoint);
    tracing::info!("🌐 Allowed origins: {}", settings.allowed_origins.join(", "));

    let explorer = Explorer::from_settings(&settings)?;
    let state = AppState::new(explorer, &settings);
    let app = api::router(state, &settings.allowed_origins);

    // Start server
    let addr = settings.bind_addr();
    tracing::info!("🔭 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
