use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        registration::RegistrationSummary,
    },
    error::Result,
    repository::registration::RegistrationRepository,
};
use uuid::Uuid;

/// Register the runner for a distance category
pub async fn register(
    pool: &PgPool,
    runner_id: Uuid,
    distance_category_id: Uuid,
) -> Result<RegistrationSummary> {
    let today = Utc::now().date_naive();
    let repo = RegistrationRepository::new(pool);
    let detail = repo.register(runner_id, distance_category_id, today).await?;
    Ok(RegistrationSummary::from_detail(detail, today))
}

/// Get one of the runner's registrations
pub async fn get_registration(
    pool: &PgPool,
    registration_id: Uuid,
    runner_id: Uuid,
) -> Result<RegistrationSummary> {
    let repo = RegistrationRepository::new(pool);
    let detail = repo.find_for_runner(registration_id, runner_id).await?;
    Ok(RegistrationSummary::from_detail(detail, Utc::now().date_naive()))
}

/// Confirm payment for a pending registration
pub async fn confirm_payment(
    pool: &PgPool,
    registration_id: Uuid,
    runner_id: Uuid,
) -> Result<RegistrationSummary> {
    let repo = RegistrationRepository::new(pool);
    let detail = repo.confirm_payment(registration_id, runner_id).await?;
    Ok(RegistrationSummary::from_detail(detail, Utc::now().date_naive()))
}

/// Cancel a registration
pub async fn cancel_registration(pool: &PgPool, registration_id: Uuid, runner_id: Uuid) -> Result<()> {
    let repo = RegistrationRepository::new(pool);
    repo.cancel(registration_id, runner_id, Utc::now().date_naive())
        .await
}

/// List the runner's registrations, newest first
pub async fn list_registrations(
    pool: &PgPool,
    runner_id: Uuid,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<RegistrationSummary>> {
    let today = Utc::now().date_naive();
    let repo = RegistrationRepository::new(pool);
    let (registrations, total) = repo.list_for_runner(runner_id, pagination).await?;

    Ok(PaginatedResponse::new(
        registrations
            .into_iter()
            .map(|detail| RegistrationSummary::from_detail(detail, today))
            .collect(),
        pagination.page,
        pagination.page_size,
        total,
    ))
}
