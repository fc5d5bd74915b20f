use axum::{http::Method, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::health::{api_health_check, health_check};
use crate::state::AppState;

pub(crate) mod profile;

/// Assembles the whole route table from the collaborator handles in `state`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(api_health_check))
        .nest("/api/profile", profile::profile_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
