pub mod config;
pub mod error;
pub mod geometry;
pub mod gpx_export;
pub mod handlers;
pub mod highlight;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod resolve;
pub mod store;

use std::sync::Arc;

use axum::{Router, routing::get, routing::post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::RouteStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RouteStore>,
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/routes", get(handlers::list_routes))
        .route("/api/routes/reload", post(handlers::reload_routes))
        .route("/api/routes/:identifier", get(handlers::get_route))
        .route("/api/routes/:identifier/metrics", get(handlers::route_metrics))
        .route("/api/routes/:identifier/gpx", get(handlers::route_gpx))
        .route("/api/normalize", post(handlers::normalize))
        .route(
            "/api/highlight",
            get(handlers::get_highlight)
                .post(handlers::set_highlight)
                .delete(handlers::clear_highlight),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
