use sqlx::PgPool;
use storage::{
    dto::{
        common::{PaginatedResponse, PaginationParams},
        result::{RecordResultRequest, ResultSummary},
    },
    error::Result,
    repository::result::ResultRepository,
};
use uuid::Uuid;

/// Record or overwrite the result of a registration
pub async fn record_result(
    pool: &PgPool,
    registration_id: Uuid,
    request: &RecordResultRequest,
) -> Result<ResultSummary> {
    let repo = ResultRepository::new(pool);
    repo.record(registration_id, request)
        .await
        .map(ResultSummary::from)
}

/// Result of one of the runner's registrations
pub async fn get_result(
    pool: &PgPool,
    registration_id: Uuid,
    runner_id: Uuid,
) -> Result<ResultSummary> {
    let repo = ResultRepository::new(pool);
    repo.find_for_runner(registration_id, runner_id)
        .await
        .map(ResultSummary::from)
}

/// List the runner's results, most recent race first
pub async fn list_results(
    pool: &PgPool,
    runner_id: Uuid,
    pagination: &PaginationParams,
) -> Result<PaginatedResponse<ResultSummary>> {
    let repo = ResultRepository::new(pool);
    let (results, total) = repo.list_for_runner(runner_id, pagination).await?;

    Ok(PaginatedResponse::new(results, pagination.page, pagination.page_size, total)
        .map(ResultSummary::from))
}
