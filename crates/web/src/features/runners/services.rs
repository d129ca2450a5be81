use sqlx::PgPool;
use storage::{
    dto::runner::CreateRunnerRequest, error::Result, models::Runner,
    repository::runner::RunnerRepository,
};
use uuid::Uuid;

/// Create a new runner account
pub async fn create_runner(pool: &PgPool, request: &CreateRunnerRequest) -> Result<Runner> {
    let repo = RunnerRepository::new(pool);
    repo.create(request).await
}

/// Get runner by id
pub async fn get_runner(pool: &PgPool, runner_id: Uuid) -> Result<Runner> {
    let repo = RunnerRepository::new(pool);
    repo.find_by_id(runner_id).await
}
