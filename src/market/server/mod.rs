// SPDX-License-Identifier: MIT

//! HTTP surface for the merchant and rider dashboards

mod error;
mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::hub::Session;
use crate::market::config::ServerConfig;
use crate::market::seed::{CityTable, SeedDefinition};
use crate::market::tracking::{TrackerConfig, TrackerRegistry};

pub use error::{ApiError, ApiResult};

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub session: Session,
    pub cities: Arc<CityTable>,
    pub trackers: TrackerRegistry,
    pub tracker_config: TrackerConfig,
}

impl AppState {
    /// Fresh session built from seed data
    pub fn new(seed: &SeedDefinition, tracker_config: TrackerConfig) -> Self {
        Self {
            session: Session::new(seed.build_store()),
            cities: Arc::new(seed.city_table()),
            trackers: TrackerRegistry::new(),
            tracker_config,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/cities", get(handlers::list_cities))
        .route("/api/merchant/riders", get(handlers::available_riders))
        .route(
            "/api/merchant/campaigns",
            get(handlers::list_campaigns).post(handlers::create_campaign),
        )
        .route(
            "/api/merchant/campaigns/{title}/invite",
            post(handlers::invite_riders),
        )
        .route(
            "/api/merchant/campaigns/{title}/map",
            get(handlers::campaign_map),
        )
        .route(
            "/api/merchant/campaigns/{title}/tracking",
            post(handlers::start_tracking).delete(handlers::stop_tracking),
        )
        .route(
            "/api/merchant/campaigns/{title}/tracking/stream",
            get(handlers::stream_tracking),
        )
        .route("/api/riders/{name}", get(handlers::rider_login))
        .route(
            "/api/riders/{name}/campaigns",
            get(handlers::pending_campaigns),
        )
        .route("/api/riders/{name}/active", get(handlers::active_campaign))
        .route(
            "/api/riders/{name}/campaigns/{title}/accept",
            post(handlers::accept_campaign),
        )
        .route("/api/riders/{name}/complete", post(handlers::complete_campaign))
        .route(
            "/api/riders/{name}/share-location",
            post(handlers::share_location),
        )
        .route("/api/riders/{name}/location", put(handlers::update_location))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on an already-bound listener until the process stops
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let trackers = state.trackers.clone();
    let app = router(state);

    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("Shutting down");
        })
        .await?;

    trackers.stop_all().await;
    Ok(())
}

pub async fn serve(
    config: &ServerConfig,
    seed: &SeedDefinition,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let state = AppState::new(seed, config.tracker());
    let listener = TcpListener::bind(config.bind_address()).await?;
    serve_on(listener, state).await
}
