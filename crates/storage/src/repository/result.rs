use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::result::RecordResultRequest;
use crate::error::{Result, StorageError};
use crate::models::ResultDetail;

const DETAIL_SELECT: &str = r#"
    SELECT res.result_id, res.registration_id, res.finish_time_seconds,
           res.overall_rank, res.gender_rank, res.age_category_rank,
           res.status, res.recorded_at,
           r.race_id, r.name AS race_name, r.race_date,
           d.name AS distance_name, d.distance_km
    FROM results res
    JOIN registrations reg ON reg.registration_id = res.registration_id
    JOIN distance_categories d ON d.distance_category_id = reg.distance_category_id
    JOIN races r ON r.race_id = d.race_id
"#;

pub struct ResultRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ResultRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the result for a registration, or overwrite the existing one
    pub async fn record(
        &self,
        registration_id: Uuid,
        req: &RecordResultRequest,
    ) -> Result<ResultDetail> {
        let mut tx = self.pool.begin().await?;

        let registration_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM registrations WHERE registration_id = $1)",
        )
        .bind(registration_id)
        .fetch_one(&mut *tx)
        .await?;
        if !registration_exists {
            return Err(StorageError::not_found("Registration"));
        }

        let result_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO results (registration_id, finish_time_seconds, overall_rank,
                                 gender_rank, age_category_rank, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (registration_id) DO UPDATE
            SET finish_time_seconds = EXCLUDED.finish_time_seconds,
                overall_rank = EXCLUDED.overall_rank,
                gender_rank = EXCLUDED.gender_rank,
                age_category_rank = EXCLUDED.age_category_rank,
                status = EXCLUDED.status,
                recorded_at = (NOW() AT TIME ZONE 'utc')
            RETURNING result_id
            "#,
        )
        .bind(registration_id)
        .bind(req.finish_time)
        .bind(req.overall_rank)
        .bind(req.gender_rank)
        .bind(req.age_category_rank)
        .bind(req.status)
        .fetch_one(&mut *tx)
        .await?;

        let detail = fetch_detail(&mut tx, result_id).await?;
        tx.commit().await?;

        tracing::info!(%registration_id, %result_id, status = ?req.status, "Result recorded");
        Ok(detail)
    }

    /// Result of one of the runner's registrations
    pub async fn find_for_runner(&self, registration_id: Uuid, runner_id: Uuid) -> Result<ResultDetail> {
        sqlx::query_as::<_, ResultDetail>(&format!(
            "{DETAIL_SELECT} WHERE res.registration_id = $1 AND reg.runner_id = $2"
        ))
        .bind(registration_id)
        .bind(runner_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StorageError::not_found("Result"))
    }

    /// A runner's results, most recent race first
    pub async fn list_for_runner(
        &self,
        runner_id: Uuid,
        pagination: &PaginationParams,
    ) -> Result<(Vec<ResultDetail>, i64)> {
        let results = sqlx::query_as::<_, ResultDetail>(&format!(
            r#"
            {DETAIL_SELECT}
            WHERE reg.runner_id = $1
            ORDER BY r.race_date DESC, res.recorded_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(runner_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM results res
            JOIN registrations reg ON reg.registration_id = res.registration_id
            WHERE reg.runner_id = $1
            "#,
        )
        .bind(runner_id)
        .fetch_one(self.pool)
        .await?;

        Ok((results, total))
    }
}

async fn fetch_detail(conn: &mut PgConnection, result_id: Uuid) -> Result<ResultDetail> {
    let detail = sqlx::query_as::<_, ResultDetail>(&format!("{DETAIL_SELECT} WHERE res.result_id = $1"))
        .bind(result_id)
        .fetch_one(conn)
        .await?;

    Ok(detail)
}
