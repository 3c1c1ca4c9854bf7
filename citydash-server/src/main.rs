//! US city population dashboard server
//!
//! Loads the city table once, then recomposes the chart set for every control
//! change sent by the dashboard page.

mod api;
mod config;
mod error;
mod models;

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, routing::get};
use citydash::prelude::{Dataset, Variant};
use clap::Parser;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Application state shared across handlers
pub struct AppState {
    pub dataset: Dataset,
    pub variant: Variant,
    pub config: Config,
}

/// Build the router for `state`
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Page routes
        .route("/", get(api::portal::index))
        .route("/healthz", get(api::portal::healthz))
        // API routes
        .nest("/api/v1", api::dashboard::router())
        // WebSocket route
        .route("/ws/v1/compose", get(api::stream::ws_handler))
        // Static files
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        // Middleware
        .layer(GlobalConcurrencyLimitLayer::new(state.config.max_concurrent))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "citydash_server=debug,citydash=info,tower_http=debug".into()
            }),
        )
        .init();

    // Parse CLI args
    let config = Config::parse();
    info!(
        "Starting citydash-server ({} dashboard) on {}:{}",
        config.variant, config.host, config.port
    );

    // Load the dataset before accepting connections; any failure aborts startup
    let source = config.data_source();
    let dataset = tokio::task::spawn_blocking(move || Dataset::load(&source))
        .await
        .context("dataset loader panicked")?
        .map_err(|report| anyhow::anyhow!("{report:?}"))?;
    info!("Dataset ready with {} cities", dataset.len());

    let state = Arc::new(AppState {
        dataset,
        variant: config.variant,
        config: config.clone(),
    });

    let app = app(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);

    if let (Some(cert_path), Some(key_path)) = (&config.tls_cert, &config.tls_key) {
        // TLS enabled
        info!("TLS enabled with cert: {}", cert_path);
        let tls_config = config::load_tls_config(cert_path, key_path)?;
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        axum_server::from_tcp_rustls(listener.into_std()?, tls_config)
            .serve(app.into_make_service())
            .await?;
    } else {
        // Plain HTTP
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Listening on http://{}", addr);
        axum::serve(listener, app).await?;
    }

    Ok(())
}
