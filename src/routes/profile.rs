use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::handlers::profile::{
    get_all_profiles, get_current_profile, get_profile_by_user_id, upsert_profile,
};
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

/// `/me` and `POST /` sit behind the auth middleware; the rest is public.
pub fn profile_routes(state: AppState) -> Router<AppState> {
    let auth = from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/",
            get(get_all_profiles).merge(post(upsert_profile).route_layer(auth.clone())),
        )
        .route("/me", get(get_current_profile).route_layer(auth))
        .route("/user/:user_id", get(get_profile_by_user_id))
}
