use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::runner::RunnerRepository;
use crate::dto::profile::ProfileResponse;
use crate::error::Result;
use crate::services::statistics::{self, HistoryEntry};

pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every registration of the runner with race context and result, if any
    pub async fn history(&self, runner_id: Uuid) -> Result<Vec<HistoryEntry>> {
        let history = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT reg.registration_id, reg.registered_at, reg.payment_status,
                   r.race_id, r.name AS race_name, r.race_date,
                   d.name AS distance_name, d.distance_km,
                   res.status AS result_status, res.finish_time_seconds, res.overall_rank
            FROM registrations reg
            JOIN distance_categories d ON d.distance_category_id = reg.distance_category_id
            JOIN races r ON r.race_id = d.race_id
            LEFT JOIN results res ON res.registration_id = reg.registration_id
            WHERE reg.runner_id = $1
            ORDER BY reg.registered_at DESC
            "#,
        )
        .bind(runner_id)
        .fetch_all(self.pool)
        .await?;

        Ok(history)
    }

    /// Runner profile with statistics computed from scratch
    pub async fn get_profile(&self, runner_id: Uuid, today: NaiveDate) -> Result<ProfileResponse> {
        let runner = RunnerRepository::new(self.pool).find_by_id(runner_id).await?;
        let history = self.history(runner_id).await?;

        Ok(ProfileResponse {
            runner_id: runner.runner_id,
            full_name: runner.full_name(),
            email: runner.email,
            gender: runner.gender,
            member_since: runner.created_at,
            statistics: statistics::summarize(&history, today),
            best_times: statistics::best_times(&history),
            personal_records: statistics::personal_records(&history),
            recent_activity: statistics::recent_activity(&history),
        })
    }
}
