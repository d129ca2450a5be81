use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "race_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RaceStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Race {
    pub race_id: Uuid,
    pub name: String,
    pub location: String,
    pub race_date: NaiveDate,
    pub status: RaceStatus,
    pub organizer_id: Option<Uuid>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DistanceCategory {
    pub distance_category_id: Uuid,
    pub race_id: Uuid,
    pub name: String,
    pub distance_km: Decimal,
    pub registration_fee: Decimal,
    pub max_participants: i32,
    #[schema(value_type = String, example = "08:30:00")]
    pub start_time: NaiveTime,
}

/// A distance category joined with the race it belongs to. This is everything
/// the ledger needs to decide whether a registration may proceed.
#[derive(Debug, Clone, FromRow)]
pub struct DistanceContext {
    pub distance_category_id: Uuid,
    pub race_id: Uuid,
    pub race_name: String,
    pub race_location: String,
    pub race_date: NaiveDate,
    pub race_status: RaceStatus,
    pub distance_name: String,
    pub distance_km: Decimal,
    pub registration_fee: Decimal,
    pub max_participants: i32,
    pub start_time: NaiveTime,
}
