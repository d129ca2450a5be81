use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::profile::ProfileResponse};

use crate::error::WebError;
use crate::middleware::auth::AuthRunner;

use super::services;

#[utoipa::path(
    get,
    path = "/api/profile",
    security(
        ("runner_token" = [])
    ),
    responses(
        (status = 200, description = "Runner profile with statistics", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Runner not found")
    ),
    tag = "profile"
)]
pub async fn get_profile(
    State(db): State<Database>,
    runner: AuthRunner,
) -> Result<Response, WebError> {
    let profile = services::get_profile(db.pool(), runner.runner_id).await?;

    Ok(Json(profile).into_response())
}
