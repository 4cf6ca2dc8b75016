//! API routes for the eth-whatif gateway.

pub mod analyze;
pub mod balance;
pub mod error;
pub mod health;
pub mod market;
pub mod ui;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the API router with all routes.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(balance::router())
        .merge(market::router())
        .merge(analyze::router())
}

/// The full application: `/api/*`, the browser UI at `/`, and (when
/// `server.legacy_routes` is set) every API route again without the prefix.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/api", get(health::status))
        .nest("/api", api_router())
        .merge(ui::router());

    if state.config.server.legacy_routes {
        router = router.merge(api_router());
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
