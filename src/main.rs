use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_recommender::{
    config::Config,
    routes::{create_router, AppState},
    services::{providers::TmdbProvider, PosterCache, PosterEnricher, Recommender},
    store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Nothing is served until both artifacts are loaded and agree on size
    let http_client = reqwest::Client::builder()
        .timeout(config.artifact_download_timeout())
        .build()?;
    store::ensure_artifact(
        &config.similarity_path,
        config.similarity_url.as_deref(),
        &http_client,
    )
    .await?;

    let (catalog, matrix) = store::load_artifacts(&config.catalog_path, &config.similarity_path)?;
    let recommender = Recommender::new(catalog, matrix)?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.metadata_timeout(),
    )?;

    let mut enricher = PosterEnricher::new(
        Arc::new(provider),
        config.tmdb_image_base_url.clone(),
        config.poster_fallback_url.clone(),
    );
    if let Some(ttl) = config.poster_cache_ttl() {
        tracing::info!(ttl_secs = ttl.as_secs(), "Poster cache enabled");
        enricher = enricher.with_cache(PosterCache::new(ttl));
    }

    let state = Arc::new(AppState {
        recommender: Arc::new(recommender),
        enricher,
        default_k: config.default_k,
        max_k: config.max_k,
    });

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server running on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}
