use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::FinishTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "result_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    DidNotStart,
    Finished,
    Dnf,
}

/// Result joined with the race and distance it was achieved on.
#[derive(Debug, Clone, FromRow)]
pub struct ResultDetail {
    pub result_id: Uuid,
    pub registration_id: Uuid,
    #[sqlx(rename = "finish_time_seconds")]
    pub finish_time: Option<FinishTime>,
    pub overall_rank: Option<i32>,
    pub gender_rank: Option<i32>,
    pub age_category_rank: Option<i32>,
    pub status: ResultStatus,
    pub recorded_at: NaiveDateTime,
    pub race_id: Uuid,
    pub race_name: String,
    pub race_date: NaiveDate,
    pub distance_name: String,
    pub distance_km: Decimal,
}

impl ResultDetail {
    pub fn is_top_three(&self) -> bool {
        self.overall_rank.is_some_and(|rank| rank <= 3)
    }

    pub fn is_top_ten(&self) -> bool {
        self.overall_rank.is_some_and(|rank| rank <= 10)
    }

    pub fn average_pace(&self) -> Option<Decimal> {
        self.finish_time?.pace_per_km(self.distance_km)
    }

    pub fn formatted_pace(&self) -> Option<String> {
        self.finish_time?.formatted_pace(self.distance_km)
    }
}
