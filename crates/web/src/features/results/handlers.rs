use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::{PaginatedResponse, PaginationParams},
        result::{RecordResultRequest, ResultSummary},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthRunner;

use super::services;

#[utoipa::path(
    post,
    path = "/api/registrations/{registration_id}/result",
    params(
        ("registration_id" = Uuid, Path, description = "Registration id")
    ),
    request_body = RecordResultRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Result recorded", body = ResultSummary),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Registration not found")
    ),
    tag = "results"
)]
pub async fn record_result(
    State(db): State<Database>,
    Path(registration_id): Path<Uuid>,
    Json(req): Json<RecordResultRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let result = services::record_result(db.pool(), registration_id, &req).await?;

    Ok(Json(result).into_response())
}

#[utoipa::path(
    get,
    path = "/api/registrations/{registration_id}/result",
    params(
        ("registration_id" = Uuid, Path, description = "Registration id")
    ),
    security(
        ("runner_token" = [])
    ),
    responses(
        (status = 200, description = "Result of the registration", body = ResultSummary),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No result for a registration of this runner")
    ),
    tag = "results"
)]
pub async fn get_result(
    State(db): State<Database>,
    runner: AuthRunner,
    Path(registration_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let result = services::get_result(db.pool(), registration_id, runner.runner_id).await?;

    Ok(Json(result).into_response())
}

#[utoipa::path(
    get,
    path = "/api/results",
    params(PaginationParams),
    security(
        ("runner_token" = [])
    ),
    responses(
        (status = 200, description = "Page of the runner's results", body = PaginatedResponse<ResultSummary>),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "results"
)]
pub async fn list_results(
    State(db): State<Database>,
    runner: AuthRunner,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let page = services::list_results(db.pool(), runner.runner_id, &pagination).await?;

    Ok(Json(page).into_response())
}
