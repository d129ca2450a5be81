mod common;

use rust_decimal::Decimal;
use sqlx::PgPool;
use storage::dto::common::PaginationParams;
use storage::dto::race::RaceFilter;
use storage::error::StorageError;
use storage::models::RaceStatus;
use storage::repository::race::RaceRepository;
use storage::repository::registration::RegistrationRepository;
use uuid::Uuid;

use common::{days_from_today, distance, open_distance, seed_distance, seed_runner, today};

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_distance_context_carries_race_fields(pool: PgPool) {
    let race_date = days_from_today(15);
    let id = seed_distance(&pool, race_date, RaceStatus::Approved, Decimal::new(211, 1), 25).await;

    let context = RaceRepository::new(&pool)
        .find_distance_context(id)
        .await
        .unwrap();

    assert_eq!(context.distance_category_id, id);
    assert_eq!(context.race_date, race_date);
    assert_eq!(context.race_status, RaceStatus::Approved);
    assert_eq!(context.max_participants, 25);
    assert_eq!(context.distance_km, Decimal::new(211, 1));

    let err = RaceRepository::new(&pool)
        .find_distance_context(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_registration_carries_race_and_distance_fields(pool: PgPool) {
    let race_date = days_from_today(15);
    let id = seed_distance(&pool, race_date, RaceStatus::Approved, Decimal::new(211, 1), 25).await;
    let runner = seed_runner(&pool, "Noa").await;
    let repo = RegistrationRepository::new(&pool);

    let registration = repo.register(runner.runner_id, id, today()).await.unwrap();

    assert_eq!(registration.distance_category_id, id);
    assert_eq!(registration.race_date, race_date);
    assert_eq!(registration.race_location, "Zagreb");
    assert_eq!(registration.distance_km, Decimal::new(211, 1));

    let err = repo
        .register(runner.runner_id, Uuid::new_v4(), today())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_race_detail_reports_free_slots(pool: PgPool) {
    let id = open_distance(&pool, 2).await;

    let runner = seed_runner(&pool, "Mia").await;
    let race_id = RegistrationRepository::new(&pool)
        .register(runner.runner_id, id, today())
        .await
        .unwrap()
        .race_id;

    let detail = RaceRepository::new(&pool).find_detail(race_id).await.unwrap();
    let category = &detail.distances[0];
    assert_eq!(category.registered_count, 1);
    assert_eq!(category.available_slots, 1);
    assert!(!category.is_full);

    let extra = RaceRepository::new(&pool)
        .add_distance(race_id, &distance("Fun Run", Decimal::from(5), 100))
        .await
        .unwrap();
    assert_eq!(extra.race_id, race_id);

    let detail = RaceRepository::new(&pool).find_detail(race_id).await.unwrap();
    assert_eq!(detail.distances.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_new_races_start_pending_and_filter_by_status(pool: PgPool) {
    seed_distance(&pool, days_from_today(10), RaceStatus::Pending, Decimal::from(10), 10).await;
    seed_distance(&pool, days_from_today(20), RaceStatus::Approved, Decimal::from(10), 10).await;
    seed_distance(&pool, days_from_today(30), RaceStatus::Approved, Decimal::from(10), 10).await;

    let repo = RaceRepository::new(&pool);
    let (approved, total) = repo
        .list(
            &RaceFilter {
                status: Some(RaceStatus::Approved),
            },
            &PaginationParams::default(),
        )
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert!(approved.iter().all(|race| race.status == RaceStatus::Approved));
    assert!(approved[0].race_date < approved[1].race_date);

    let (_, all) = repo
        .list(&RaceFilter::default(), &PaginationParams::new(1, 1))
        .await
        .unwrap();
    assert_eq!(all, 3);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_distance_to_unknown_race_is_not_found(pool: PgPool) {
    let err = RaceRepository::new(&pool)
        .add_distance(Uuid::new_v4(), &distance("10K", Decimal::from(10), 10))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound(_)));
}
