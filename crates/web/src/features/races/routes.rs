use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{
    add_distance, create_race, get_distance, get_race, list_races, update_race_status,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_race))
        .route("/:race_id/status", put(update_race_status))
        .route("/:race_id/distances", post(add_distance))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", get(list_races))
        .route("/:race_id", get(get_race))
        .merge(protected)
}

pub fn distance_routes() -> Router<AppState> {
    Router::new().route("/:distance_category_id", get(get_distance))
}
