use chrono::NaiveDate;
use sqlx::{Connection, PgConnection, PgPool};
use uuid::Uuid;

use super::race::lock_distance_context;
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::{Registration, RegistrationDetail};
use crate::services::bib::{MAX_BIB_ATTEMPTS, draw_bib_number};
use crate::services::ledger::{self, RegistrationPlan};

const DETAIL_SELECT: &str = r#"
    SELECT reg.registration_id, reg.runner_id, reg.distance_category_id,
           reg.registered_at, reg.payment_status, reg.bib_number,
           d.race_id, r.name AS race_name, r.location AS race_location, r.race_date,
           d.name AS distance_name, d.distance_km, d.registration_fee, d.start_time
    FROM registrations reg
    JOIN distance_categories d ON d.distance_category_id = reg.distance_category_id
    JOIN races r ON r.race_id = d.race_id
"#;

/// Repository for the registration ledger
pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a runner for a distance category.
    ///
    /// Runs as one transaction holding a row lock on the distance category, so
    /// the occupancy count and the insert/reactivation cannot interleave with
    /// another registration for the same distance.
    pub async fn register(
        &self,
        runner_id: Uuid,
        distance_category_id: Uuid,
        today: NaiveDate,
    ) -> Result<RegistrationDetail> {
        let mut tx = self.pool.begin().await?;

        let runner_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM runners WHERE runner_id = $1)")
                .bind(runner_id)
                .fetch_one(&mut *tx)
                .await?;
        if !runner_exists {
            return Err(StorageError::not_found("Runner"));
        }

        let distance = lock_distance_context(&mut tx, distance_category_id).await?;
        ledger::ensure_open_for_registration(&distance, today)?;

        let existing = sqlx::query_as::<_, Registration>(
            r#"
            SELECT registration_id, runner_id, distance_category_id,
                   registered_at, payment_status, bib_number
            FROM registrations
            WHERE runner_id = $1 AND distance_category_id = $2
            ORDER BY registered_at DESC
            LIMIT 1
            "#,
        )
        .bind(runner_id)
        .bind(distance_category_id)
        .fetch_optional(&mut *tx)
        .await?;

        let occupancy = count_occupancy(&mut tx, distance_category_id).await?;

        let plan = ledger::plan_registration(existing.as_ref(), occupancy, distance.max_participants)
            .inspect_err(|e| {
                if matches!(e, StorageError::CapacityExceeded) {
                    tracing::warn!(
                        %runner_id,
                        %distance_category_id,
                        occupancy,
                        max_participants = distance.max_participants,
                        "Registration rejected, distance is full"
                    );
                }
            })?;

        let registration_id = match plan {
            RegistrationPlan::Create => {
                sqlx::query_scalar::<_, Uuid>(
                    r#"
                    INSERT INTO registrations (runner_id, distance_category_id, payment_status)
                    VALUES ($1, $2, 'pending')
                    RETURNING registration_id
                    "#,
                )
                .bind(runner_id)
                .bind(distance_category_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(StorageError::from)
                .map_err(|e| {
                    if e.is_unique_violation() {
                        StorageError::ConstraintViolation(
                            "Already registered for this distance".to_string(),
                        )
                    } else {
                        e
                    }
                })?
            }
            RegistrationPlan::Reactivate(registration_id) => {
                sqlx::query(
                    r#"
                    UPDATE registrations
                    SET payment_status = 'pending',
                        registered_at = (NOW() AT TIME ZONE 'utc'),
                        bib_number = NULL
                    WHERE registration_id = $1
                    "#,
                )
                .bind(registration_id)
                .execute(&mut *tx)
                .await?;
                registration_id
            }
        };

        let detail = fetch_detail(&mut tx, registration_id).await?;
        tx.commit().await?;

        tracing::info!(
            %registration_id,
            %runner_id,
            %distance_category_id,
            reactivated = matches!(plan, RegistrationPlan::Reactivate(_)),
            "Registration recorded"
        );

        Ok(detail)
    }

    /// Mark a pending registration as paid and hand out a bib number
    pub async fn confirm_payment(
        &self,
        registration_id: Uuid,
        runner_id: Uuid,
    ) -> Result<RegistrationDetail> {
        let mut tx = self.pool.begin().await?;

        let registration = lock_owned(&mut tx, registration_id, runner_id).await?;
        ledger::ensure_payable(registration.payment_status)?;

        if registration.bib_number.is_none() {
            let bib = assign_bib_number(&mut tx, registration_id).await?;
            tracing::debug!(%registration_id, bib, "Bib number assigned");
        }

        sqlx::query("UPDATE registrations SET payment_status = 'paid' WHERE registration_id = $1")
            .bind(registration_id)
            .execute(&mut *tx)
            .await?;

        let detail = fetch_detail(&mut tx, registration_id).await?;
        tx.commit().await?;

        tracing::info!(%registration_id, %runner_id, bib = ?detail.bib_number, "Payment confirmed");
        Ok(detail)
    }

    /// Cancel a registration before race day, releasing its seat
    pub async fn cancel(&self, registration_id: Uuid, runner_id: Uuid, today: NaiveDate) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let registration = lock_owned(&mut tx, registration_id, runner_id).await?;
        let race_date: NaiveDate = sqlx::query_scalar(
            r#"
            SELECT r.race_date
            FROM distance_categories d
            JOIN races r ON r.race_id = d.race_id
            WHERE d.distance_category_id = $1
            "#,
        )
        .bind(registration.distance_category_id)
        .fetch_one(&mut *tx)
        .await?;

        ledger::ensure_cancellable(registration.payment_status, race_date, today)?;

        sqlx::query(
            "UPDATE registrations SET payment_status = 'cancelled' WHERE registration_id = $1",
        )
        .bind(registration_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(%registration_id, %runner_id, "Registration cancelled");
        Ok(())
    }

    /// Get one registration owned by the runner
    pub async fn find_for_runner(
        &self,
        registration_id: Uuid,
        runner_id: Uuid,
    ) -> Result<RegistrationDetail> {
        sqlx::query_as::<_, RegistrationDetail>(&format!(
            "{DETAIL_SELECT} WHERE reg.registration_id = $1 AND reg.runner_id = $2"
        ))
        .bind(registration_id)
        .bind(runner_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StorageError::not_found("Registration"))
    }

    /// List a runner's registrations, newest first
    pub async fn list_for_runner(
        &self,
        runner_id: Uuid,
        pagination: &PaginationParams,
    ) -> Result<(Vec<RegistrationDetail>, i64)> {
        let registrations = sqlx::query_as::<_, RegistrationDetail>(&format!(
            r#"
            {DETAIL_SELECT}
            WHERE reg.runner_id = $1
            ORDER BY reg.registered_at DESC, reg.registration_id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(runner_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE runner_id = $1")
            .bind(runner_id)
            .fetch_one(self.pool)
            .await?;

        Ok((registrations, total))
    }

    /// Number of seats currently taken on a distance category
    pub async fn occupancy(&self, distance_category_id: Uuid) -> Result<i64> {
        let mut conn = self.pool.acquire().await?;
        count_occupancy(&mut conn, distance_category_id).await
    }
}

async fn count_occupancy(conn: &mut PgConnection, distance_category_id: Uuid) -> Result<i64> {
    let occupancy = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM registrations
        WHERE distance_category_id = $1 AND payment_status <> 'cancelled'
        "#,
    )
    .bind(distance_category_id)
    .fetch_one(conn)
    .await?;

    Ok(occupancy)
}

/// Lock a registration row, treating someone else's registration as absent.
async fn lock_owned(
    conn: &mut PgConnection,
    registration_id: Uuid,
    runner_id: Uuid,
) -> Result<Registration> {
    sqlx::query_as::<_, Registration>(
        r#"
        SELECT registration_id, runner_id, distance_category_id,
               registered_at, payment_status, bib_number
        FROM registrations
        WHERE registration_id = $1 AND runner_id = $2
        FOR UPDATE
        "#,
    )
    .bind(registration_id)
    .bind(runner_id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| StorageError::not_found("Registration"))
}

async fn fetch_detail(conn: &mut PgConnection, registration_id: Uuid) -> Result<RegistrationDetail> {
    let detail = sqlx::query_as::<_, RegistrationDetail>(&format!(
        "{DETAIL_SELECT} WHERE reg.registration_id = $1"
    ))
    .bind(registration_id)
    .fetch_one(conn)
    .await?;

    Ok(detail)
}

/// Draw random bibs until one is free. Each attempt runs in a savepoint so a
/// collision on the unique bib index only rolls back that attempt.
async fn assign_bib_number(conn: &mut PgConnection, registration_id: Uuid) -> Result<i32> {
    for attempt in 1..=MAX_BIB_ATTEMPTS {
        let candidate = draw_bib_number(&mut rand::thread_rng());

        let mut savepoint = conn.begin().await?;
        let outcome = sqlx::query("UPDATE registrations SET bib_number = $2 WHERE registration_id = $1")
            .bind(registration_id)
            .bind(candidate)
            .execute(&mut *savepoint)
            .await
            .map_err(StorageError::from);

        match outcome {
            Ok(_) => {
                savepoint.commit().await?;
                return Ok(candidate);
            }
            Err(e) if e.is_unique_violation() => {
                savepoint.rollback().await?;
                tracing::debug!(%registration_id, candidate, attempt, "Bib number taken, retrying");
            }
            Err(e) => return Err(e),
        }
    }

    Err(StorageError::BibNumbersExhausted(MAX_BIB_ATTEMPTS))
}
