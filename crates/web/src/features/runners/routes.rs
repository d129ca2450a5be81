use axum::{Router, middleware, routing::post};

use super::handlers::{create_runner, issue_token};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

/// Every runner management route requires an API key.
pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", post(create_runner))
        .route("/:runner_id/token", post(issue_token))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
