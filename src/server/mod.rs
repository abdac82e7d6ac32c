//! HTTP adapter: exposes suggestion, reverse-lookup and reference-data
//! endpoints to web front-ends.

mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

use crate::config::LocatorConfig;
use crate::location::{GeocodeQueryRouter, HttpGeocoder};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/suggest", get(handlers::suggest))
        .route("/api/reverse", get(handlers::reverse))
        .route("/api/states", get(handlers::state_list))
        .route("/api/states/normalize", get(handlers::normalize_state))
        .route("/api/areas", get(handlers::areas))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn app_state(config: &LocatorConfig) -> AppState {
    let geocoder = Arc::new(HttpGeocoder::new(&config.geocoder));
    AppState {
        router: GeocodeQueryRouter::new(geocoder, &config.suggestions),
        policy: config.unknown_state,
    }
}

pub async fn start(config: &LocatorConfig) -> std::io::Result<()> {
    let app = build_router(Arc::new(app_state(config)));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, geocoder = %config.geocoder.base_url, "listing locator listening");
    axum::serve(listener, app).await
}
