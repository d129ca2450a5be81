use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        registration::{RegisterRequest, RegistrationSummary},
    },
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::AuthRunner;

use super::services;

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = RegisterRequest,
    security(
        ("runner_token" = [])
    ),
    responses(
        (status = 201, description = "Registered, payment pending", body = RegistrationSummary),
        (status = 400, description = "Race not open for registration, or the distance is full"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Distance category not found"),
        (status = 409, description = "Already registered for this distance")
    ),
    tag = "registrations"
)]
pub async fn register(
    State(db): State<Database>,
    runner: AuthRunner,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    let registration =
        services::register(db.pool(), runner.runner_id, req.distance_category_id).await?;

    Ok((StatusCode::CREATED, Json(registration)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations",
    params(PaginationParams),
    security(
        ("runner_token" = [])
    ),
    responses(
        (status = 200, description = "Page of the runner's registrations, newest first", body = PaginatedResponse<RegistrationSummary>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "registrations"
)]
pub async fn list_registrations(
    State(db): State<Database>,
    runner: AuthRunner,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let page = services::list_registrations(db.pool(), runner.runner_id, &pagination).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations/{registration_id}",
    params(
        ("registration_id" = Uuid, Path, description = "Registration id")
    ),
    security(
        ("runner_token" = [])
    ),
    responses(
        (status = 200, description = "Registration found", body = RegistrationSummary),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Registration not found")
    ),
    tag = "registrations"
)]
pub async fn get_registration(
    State(db): State<Database>,
    runner: AuthRunner,
    Path(registration_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let registration =
        services::get_registration(db.pool(), registration_id, runner.runner_id).await?;

    Ok(Json(registration).into_response())
}

#[utoipa::path(
    post,
    path = "/api/registrations/{registration_id}/pay",
    params(
        ("registration_id" = Uuid, Path, description = "Registration id")
    ),
    security(
        ("runner_token" = [])
    ),
    responses(
        (status = 200, description = "Payment confirmed and bib number assigned", body = RegistrationSummary),
        (status = 400, description = "Registration is cancelled"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Registration not found"),
        (status = 409, description = "Registration is already paid")
    ),
    tag = "registrations"
)]
pub async fn confirm_payment(
    State(db): State<Database>,
    runner: AuthRunner,
    Path(registration_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let registration =
        services::confirm_payment(db.pool(), registration_id, runner.runner_id).await?;

    Ok(Json(registration).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/registrations/{registration_id}",
    params(
        ("registration_id" = Uuid, Path, description = "Registration id")
    ),
    security(
        ("runner_token" = [])
    ),
    responses(
        (status = 204, description = "Registration cancelled"),
        (status = 400, description = "Race already occurred or registration already cancelled"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Registration not found")
    ),
    tag = "registrations"
)]
pub async fn cancel_registration(
    State(db): State<Database>,
    runner: AuthRunner,
    Path(registration_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::cancel_registration(db.pool(), registration_id, runner.runner_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
