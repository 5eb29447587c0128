use anyhow::Result;
use language_registry::{config::Config, db::LanguageStore, routes, server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("language_registry=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    info!("Opening database at {}", config.database_path);

    let store = LanguageStore::open(&config).await?;
    let app = routes::build_router(store);

    server::serve(app, &config.bind_address()).await
}
