use std::sync::Arc;

use marquee_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        build_catalog_index,
        providers::{DisabledPosterProvider, OmdbPosterProvider, PosterProvider},
    },
    sources::load_sources,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Build the catalog index before serving; any failure here is fatal
    let sources = load_sources(&config.movies_path, &config.credits_path)?;
    let index = tokio::task::spawn_blocking(move || build_catalog_index(sources)).await??;

    let poster_provider: Arc<dyn PosterProvider> = match config.omdb_api_key.clone() {
        Some(api_key) => Arc::new(OmdbPosterProvider::new(
            api_key,
            config.omdb_api_url.clone(),
            config.poster_timeout(),
        )?),
        None => {
            tracing::warn!("OMDB_API_KEY not set, poster lookups disabled");
            Arc::new(DisabledPosterProvider)
        }
    };

    let state = Arc::new(AppState::new(index, poster_provider));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
