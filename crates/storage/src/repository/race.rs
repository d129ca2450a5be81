use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::race::{
    CreateDistanceCategoryRequest, CreateRaceRequest, DistanceCategoryResponse, RaceDetailResponse,
    RaceFilter, RaceResponse,
};
use crate::error::{Result, StorageError};
use crate::models::{DistanceCategory, DistanceContext, Race, RaceStatus};

const RACE_COLUMNS: &str =
    "race_id, name, location, race_date, status, organizer_id, description, created_at";

const DISTANCE_COLUMNS: &str = "distance_category_id, race_id, name, distance_km, registration_fee, max_participants, start_time";

const DISTANCE_CONTEXT_SELECT: &str = r#"
    SELECT d.distance_category_id, d.race_id,
           r.name AS race_name, r.location AS race_location,
           r.race_date, r.status AS race_status,
           d.name AS distance_name, d.distance_km, d.registration_fee,
           d.max_participants, d.start_time
    FROM distance_categories d
    JOIN races r ON r.race_id = d.race_id
    WHERE d.distance_category_id = $1
"#;

/// Repository for the race and distance catalog
pub struct RaceRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RaceRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List races, soonest first
    pub async fn list(
        &self,
        filter: &RaceFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Race>, i64)> {
        let races = sqlx::query_as::<_, Race>(&format!(
            r#"
            SELECT {RACE_COLUMNS}
            FROM races
            WHERE ($1::race_status IS NULL OR status = $1)
            ORDER BY race_date ASC, created_at ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(filter.status)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM races
            WHERE ($1::race_status IS NULL OR status = $1)
            "#,
        )
        .bind(filter.status)
        .fetch_one(self.pool)
        .await?;

        Ok((races, total))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Race> {
        sqlx::query_as::<_, Race>(&format!("SELECT {RACE_COLUMNS} FROM races WHERE race_id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("Race"))
    }

    /// Distance category with its race, read without locking
    pub async fn find_distance_context(&self, distance_category_id: Uuid) -> Result<DistanceContext> {
        sqlx::query_as::<_, DistanceContext>(DISTANCE_CONTEXT_SELECT)
            .bind(distance_category_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("Distance category"))
    }

    /// Race with its distance categories and their current occupancy
    pub async fn find_detail(&self, id: Uuid) -> Result<RaceDetailResponse> {
        let race = self.find_by_id(id).await?;

        let distances = sqlx::query_as::<_, DistanceCategory>(&format!(
            r#"
            SELECT {DISTANCE_COLUMNS}
            FROM distance_categories
            WHERE race_id = $1
            ORDER BY distance_km DESC, name
            "#
        ))
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let occupancy: HashMap<Uuid, i64> = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT d.distance_category_id, COUNT(r.registration_id)
            FROM distance_categories d
            LEFT JOIN registrations r
                ON r.distance_category_id = d.distance_category_id
                AND r.payment_status <> 'cancelled'
            WHERE d.race_id = $1
            GROUP BY d.distance_category_id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .collect();

        let distances = distances
            .into_iter()
            .map(|category| {
                let registered = occupancy
                    .get(&category.distance_category_id)
                    .copied()
                    .unwrap_or(0);
                DistanceCategoryResponse::new(category, registered)
            })
            .collect();

        Ok(RaceDetailResponse {
            race: RaceResponse::from(race),
            distances,
        })
    }

    /// Create a race together with its distance categories
    pub async fn create(&self, req: &CreateRaceRequest) -> Result<RaceDetailResponse> {
        let mut tx = self.pool.begin().await?;

        let race = sqlx::query_as::<_, Race>(&format!(
            r#"
            INSERT INTO races (name, location, race_date, organizer_id, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RACE_COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.location)
        .bind(req.race_date)
        .bind(req.organizer_id)
        .bind(&req.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_foreign_key_violation() {
                StorageError::not_found("Organizer")
            } else {
                e
            }
        })?;

        let mut distances = Vec::with_capacity(req.distances.len());
        for distance in &req.distances {
            let category = insert_distance(&mut tx, race.race_id, distance).await?;
            distances.push(DistanceCategoryResponse::new(category, 0));
        }

        tx.commit().await?;

        tracing::info!(race_id = %race.race_id, distances = distances.len(), "Race created");

        Ok(RaceDetailResponse {
            race: RaceResponse::from(race),
            distances,
        })
    }

    /// Add a distance category to an existing race
    pub async fn add_distance(
        &self,
        race_id: Uuid,
        req: &CreateDistanceCategoryRequest,
    ) -> Result<DistanceCategory> {
        let mut conn = self.pool.acquire().await?;
        insert_distance(&mut conn, race_id, req)
            .await
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    StorageError::not_found("Race")
                } else {
                    e
                }
            })
    }

    /// Moderation: move a race to a new lifecycle status
    pub async fn update_status(&self, id: Uuid, status: RaceStatus) -> Result<Race> {
        let race = sqlx::query_as::<_, Race>(&format!(
            r#"
            UPDATE races
            SET status = $2
            WHERE race_id = $1
            RETURNING {RACE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| StorageError::not_found("Race"))?;

        tracing::info!(race_id = %id, status = ?status, "Race status updated");
        Ok(race)
    }
}

async fn insert_distance(
    conn: &mut PgConnection,
    race_id: Uuid,
    req: &CreateDistanceCategoryRequest,
) -> Result<DistanceCategory> {
    let category = sqlx::query_as::<_, DistanceCategory>(&format!(
        r#"
        INSERT INTO distance_categories (race_id, name, distance_km, registration_fee, max_participants, start_time)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {DISTANCE_COLUMNS}
        "#
    ))
    .bind(race_id)
    .bind(&req.name)
    .bind(req.distance_km)
    .bind(req.registration_fee)
    .bind(req.max_participants)
    .bind(req.start_time)
    .fetch_one(conn)
    .await?;

    Ok(category)
}

/// Load a distance category with its race and lock the category row until
/// the surrounding transaction ends. Registrations for the same distance
/// queue up behind this lock, which keeps the occupancy check and the write
/// atomic.
pub(crate) async fn lock_distance_context(
    conn: &mut PgConnection,
    distance_category_id: Uuid,
) -> Result<DistanceContext> {
    sqlx::query_as::<_, DistanceContext>(&format!("{DISTANCE_CONTEXT_SELECT} FOR UPDATE OF d"))
        .bind(distance_category_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| StorageError::not_found("Distance category"))
}
