pub mod config;
pub mod docs;
pub mod error;
pub mod features;
pub mod middleware;
pub mod state;

use std::time::Duration;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use docs::ApiDoc;
use features::{health, profile, races, registrations, results, runners};
use state::AppState;

/// Build the application router with every route and middleware layer.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    let api_keys = state.api_keys.clone();

    let api = Router::new()
        .nest("/races", races::routes::routes(api_keys.clone()))
        .nest("/distances", races::routes::distance_routes())
        .nest("/runners", runners::routes::routes(api_keys.clone()))
        .nest("/registrations", registrations::routes::routes(api_keys))
        .nest("/results", results::routes::routes())
        .nest("/profile", profile::routes::routes());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(health::routes::routes())
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
