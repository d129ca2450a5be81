use chrono::Utc;
use sqlx::PgPool;
use storage::{
    dto::profile::ProfileResponse, error::Result, repository::profile::ProfileRepository,
};
use uuid::Uuid;

/// Runner profile with statistics recomputed from the full history
pub async fn get_profile(pool: &PgPool, runner_id: Uuid) -> Result<ProfileResponse> {
    let repo = ProfileRepository::new(pool);
    repo.get_profile(runner_id, Utc::now().date_naive()).await
}
