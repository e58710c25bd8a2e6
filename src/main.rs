mod cache;
mod config;
mod db;
mod entities;
mod error;
mod genres;
mod ingest;
mod models;
mod routes;
mod store;
mod templates;
mod tmdb;

use std::{path::Path, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,genreboard=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent("genreboard/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = MovieStore::new(db);

    let tmdb = TmdbClient::new(
        http,
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
        config.tmdb_max_pages,
    );

    // The dashboard only goes up once every configured year is in the
    // store; a failed fetch aborts startup.
    ingest::ingest_years(&tmdb, &store, Path::new(&config.cache_file), config.years()).await?;

    let state = Arc::new(AppState { config: config.clone(), store });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/api/genres", get(routes::genre_counts))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
