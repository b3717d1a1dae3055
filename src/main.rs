use std::sync::Arc;
use std::time::Duration;

use moviematch_api::{
    config::Config,
    db::{self, PgProfileStore},
    middleware::auth::JwtAuthProvider,
    routes::create_router,
    services::providers::{LastFmProvider, TmdbProvider},
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("moviematch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let catalog = TmdbProvider::new(
        config.tmdb_api_token.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
        timeout,
    )?;
    let music = LastFmProvider::new(
        config.lastfm_api_key.clone(),
        config.lastfm_api_url.clone(),
        timeout,
    )?;
    let auth = JwtAuthProvider::new(&config.jwt_secret, &config.jwt_audience);

    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(music),
        Arc::new(PgProfileStore::new(pool)),
        Arc::new(auth),
    )
    .with_recommendation_limit(config.recommendation_limit);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
