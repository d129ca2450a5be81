use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::runner::CreateRunnerRequest;
use crate::error::{Result, StorageError};
use crate::models::Runner;

pub struct RunnerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RunnerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find runner by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Runner> {
        sqlx::query_as::<_, Runner>(
            r#"
            SELECT runner_id, first_name, last_name, email, gender, created_at
            FROM runners
            WHERE runner_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StorageError::not_found("Runner"))
    }

    /// Create a new runner
    pub async fn create(&self, req: &CreateRunnerRequest) -> Result<Runner> {
        let runner = sqlx::query_as::<_, Runner>(
            r#"
            INSERT INTO runners (first_name, last_name, email, gender)
            VALUES ($1, $2, $3, $4)
            RETURNING runner_id, first_name, last_name, email, gender, created_at
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(req.email.to_lowercase())
        .bind(&req.gender)
        .fetch_one(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                StorageError::ConstraintViolation("Email is already registered".to_string())
            } else {
                e
            }
        })?;

        tracing::info!(runner_id = %runner.runner_id, "Runner created");
        Ok(runner)
    }
}
