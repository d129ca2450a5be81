use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use storage::{
    Database,
    dto::runner::{CreateRunnerRequest, RunnerResponse},
};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::TokenKeys;

use super::services;

/// Bearer token a client presents on the runner endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub runner_id: Uuid,
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

#[utoipa::path(
    post,
    path = "/api/runners",
    request_body = CreateRunnerRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 201, description = "Runner created", body = RunnerResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email is already registered")
    ),
    tag = "runners"
)]
pub async fn create_runner(
    State(db): State<Database>,
    Json(req): Json<CreateRunnerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let runner = services::create_runner(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(RunnerResponse::from(runner))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/runners/{runner_id}/token",
    params(
        ("runner_id" = Uuid, Path, description = "Runner id")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 201, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Runner not found")
    ),
    tag = "runners"
)]
pub async fn issue_token(
    State(db): State<Database>,
    State(tokens): State<TokenKeys>,
    Path(runner_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let runner = services::get_runner(db.pool(), runner_id).await?;

    let issued = tokens
        .issue(runner.runner_id)
        .map_err(|e| WebError::InternalServerError(format!("Failed to sign token: {e}")))?;

    tracing::info!(runner_id = %runner.runner_id, "Runner token issued");

    let response = TokenResponse {
        runner_id: runner.runner_id,
        access_token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at,
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}
