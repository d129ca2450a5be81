//! Fixtures shared by the database-backed tests.
//!
//! These tests need a PostgreSQL server reachable through `DATABASE_URL`;
//! `#[sqlx::test]` creates a throwaway database per test and applies the
//! crate migrations to it.

#![allow(dead_code)]

use chrono::{Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::dto::race::{CreateDistanceCategoryRequest, CreateRaceRequest};
use storage::dto::runner::CreateRunnerRequest;
use storage::models::{RaceStatus, Runner};
use storage::repository::race::RaceRepository;
use storage::repository::runner::RunnerRepository;
use uuid::Uuid;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    if days >= 0 {
        today() + Days::new(days as u64)
    } else {
        today() - Days::new(days.unsigned_abs())
    }
}

pub async fn seed_runner(pool: &PgPool, name: &str) -> Runner {
    RunnerRepository::new(pool)
        .create(&CreateRunnerRequest {
            first_name: name.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4()),
            gender: "F".to_string(),
        })
        .await
        .expect("runner should be created")
}

pub fn distance(name: &str, km: Decimal, max_participants: i32) -> CreateDistanceCategoryRequest {
    CreateDistanceCategoryRequest {
        name: name.to_string(),
        distance_km: km,
        registration_fee: Decimal::new(2500, 2),
        max_participants,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    }
}

/// Creates a race with a single distance category and returns the category id.
pub async fn seed_distance(
    pool: &PgPool,
    race_date: NaiveDate,
    status: RaceStatus,
    km: Decimal,
    max_participants: i32,
) -> Uuid {
    let repo = RaceRepository::new(pool);
    let race = repo
        .create(&CreateRaceRequest {
            name: format!("Race on {race_date}"),
            location: "Zagreb".to_string(),
            race_date,
            organizer_id: None,
            description: None,
            distances: vec![distance("Main", km, max_participants)],
        })
        .await
        .expect("race should be created");

    repo.update_status(race.race.race_id, status)
        .await
        .expect("status update should succeed");

    race.distances[0].distance_category_id
}

pub async fn open_distance(pool: &PgPool, max_participants: i32) -> Uuid {
    seed_distance(
        pool,
        days_from_today(30),
        RaceStatus::Approved,
        Decimal::from(10),
        max_participants,
    )
    .await
}

/// Moves a race into the past after registrations were taken.
pub async fn move_race_to(pool: &PgPool, distance_category_id: Uuid, race_date: NaiveDate) {
    sqlx::query(
        r#"
        UPDATE races SET race_date = $2
        WHERE race_id = (SELECT race_id FROM distance_categories WHERE distance_category_id = $1)
        "#,
    )
    .bind(distance_category_id)
    .bind(race_date)
    .execute(pool)
    .await
    .expect("race date update should succeed");
}
