use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    cancel_registration, confirm_payment, get_registration, list_registrations, register,
};
use crate::features::results::handlers::{get_result, record_result};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    // Recording a result needs the admin key.
    let record = post(record_result)
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/", post(register).get(list_registrations))
        .route(
            "/:registration_id",
            get(get_registration).delete(cancel_registration),
        )
        .route("/:registration_id/pay", post(confirm_payment))
        .route("/:registration_id/result", get(get_result).merge(record))
}
