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
        race::{
            CreateDistanceCategoryRequest, CreateRaceRequest, DistanceCategoryResponse,
            DistanceContextResponse, RaceDetailResponse, RaceFilter, RaceResponse,
            UpdateRaceStatusRequest,
        },
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/races",
    params(PaginationParams, RaceFilter),
    responses(
        (status = 200, description = "Page of races, soonest first", body = PaginatedResponse<RaceResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "races"
)]
pub async fn list_races(
    State(db): State<Database>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<RaceFilter>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let page = services::list_races(db.pool(), &filter, &pagination).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/races/{race_id}",
    params(
        ("race_id" = Uuid, Path, description = "Race id")
    ),
    responses(
        (status = 200, description = "Race with distance categories and free slots", body = RaceDetailResponse),
        (status = 404, description = "Race not found")
    ),
    tag = "races"
)]
pub async fn get_race(
    State(db): State<Database>,
    Path(race_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let race = services::get_race(db.pool(), race_id).await?;

    Ok(Json(race).into_response())
}

#[utoipa::path(
    get,
    path = "/api/distances/{distance_category_id}",
    params(
        ("distance_category_id" = Uuid, Path, description = "Distance category id")
    ),
    responses(
        (status = 200, description = "Distance category with its race", body = DistanceContextResponse),
        (status = 404, description = "Distance category not found")
    ),
    tag = "races"
)]
pub async fn get_distance(
    State(db): State<Database>,
    Path(distance_category_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let distance = services::get_distance(db.pool(), distance_category_id).await?;

    Ok(Json(distance).into_response())
}

#[utoipa::path(
    post,
    path = "/api/races",
    request_body = CreateRaceRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 201, description = "Race created in pending status", body = RaceDetailResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Organizer not found")
    ),
    tag = "races"
)]
pub async fn create_race(
    State(db): State<Database>,
    Json(req): Json<CreateRaceRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let race = services::create_race(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(race)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/races/{race_id}/distances",
    params(
        ("race_id" = Uuid, Path, description = "Race id")
    ),
    request_body = CreateDistanceCategoryRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 201, description = "Distance category added", body = DistanceCategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Race not found")
    ),
    tag = "races"
)]
pub async fn add_distance(
    State(db): State<Database>,
    Path(race_id): Path<Uuid>,
    Json(req): Json<CreateDistanceCategoryRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let category = services::add_distance(db.pool(), race_id, &req).await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/races/{race_id}/status",
    params(
        ("race_id" = Uuid, Path, description = "Race id")
    ),
    request_body = UpdateRaceStatusRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Race status updated", body = RaceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Race not found")
    ),
    tag = "races"
)]
pub async fn update_race_status(
    State(db): State<Database>,
    Path(race_id): Path<Uuid>,
    Json(req): Json<UpdateRaceStatusRequest>,
) -> Result<Response, WebError> {
    let race = services::update_race_status(db.pool(), race_id, req.status).await?;

    Ok(Json(race).into_response())
}
