use sqlx::PgPool;
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        race::{
            CreateDistanceCategoryRequest, CreateRaceRequest, DistanceCategoryResponse,
            DistanceContextResponse, RaceDetailResponse, RaceFilter, RaceResponse,
        },
    },
    error::Result,
    models::RaceStatus,
    repository::race::RaceRepository,
};
use uuid::Uuid;

/// List races, optionally filtered by status
pub async fn list_races(
    pool: &PgPool,
    filter: &RaceFilter,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<RaceResponse>> {
    let repo = RaceRepository::new(pool);
    let (races, total) = repo.list(filter, pagination).await?;

    Ok(PaginatedResponse::new(
        races.into_iter().map(RaceResponse::from).collect(),
        pagination.page,
        pagination.page_size,
        total,
    ))
}

/// Get a race with its distance categories
pub async fn get_race(pool: &PgPool, race_id: Uuid) -> Result<RaceDetailResponse> {
    let repo = RaceRepository::new(pool);
    repo.find_detail(race_id).await
}

/// Get a distance category with its race
pub async fn get_distance(pool: &PgPool, distance_category_id: Uuid) -> Result<DistanceContextResponse> {
    let repo = RaceRepository::new(pool);
    repo.find_distance_context(distance_category_id)
        .await
        .map(DistanceContextResponse::from)
}

/// Create a new race
pub async fn create_race(pool: &PgPool, request: &CreateRaceRequest) -> Result<RaceDetailResponse> {
    let repo = RaceRepository::new(pool);
    repo.create(request).await
}

/// Add a distance category to a race
pub async fn add_distance(
    pool: &PgPool,
    race_id: Uuid,
    request: &CreateDistanceCategoryRequest,
) -> Result<DistanceCategoryResponse> {
    let repo = RaceRepository::new(pool);
    let category = repo.add_distance(race_id, request).await?;
    Ok(DistanceCategoryResponse::new(category, 0))
}

/// Move a race to a new moderation status
pub async fn update_race_status(
    pool: &PgPool,
    race_id: Uuid,
    status: RaceStatus,
) -> Result<RaceResponse> {
    let repo = RaceRepository::new(pool);
    repo.update_status(race_id, status)
        .await
        .map(RaceResponse::from)
}
