use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{FinishTime, PaymentStatus, ResultStatus};

/// Runner profile with statistics recomputed on every request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub runner_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub gender: String,
    pub member_since: NaiveDateTime,
    pub statistics: RunnerStatistics,
    pub best_times: BestTimes,
    pub personal_records: Vec<PersonalRecord>,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RunnerStatistics {
    pub total_registrations: i64,
    pub active_registrations: i64,
    pub completed_races: i64,
    pub cancelled_registrations: i64,
    pub total_distance_km: Decimal,
    pub top_three_finishes: i64,
    pub top_ten_finishes: i64,
}

/// Fastest finish inside each standard distance band
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BestTimes {
    pub best_5k: Option<FinishTime>,
    pub best_10k: Option<FinishTime>,
    pub best_half_marathon: Option<FinishTime>,
    pub best_marathon: Option<FinishTime>,
}

/// Personal record for one exact distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PersonalRecord {
    pub distance_km: Decimal,
    pub distance_name: String,
    pub best_time: FinishTime,
    pub race_id: Uuid,
    pub race_name: String,
    pub race_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Registration,
    Result,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub activity_date: NaiveDateTime,
    pub registration_id: Uuid,
    pub race_name: String,
    pub distance_name: String,
    pub payment_status: Option<PaymentStatus>,
    pub result_status: Option<ResultStatus>,
    pub finish_time: Option<FinishTime>,
}
