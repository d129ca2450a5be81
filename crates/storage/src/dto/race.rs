use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{DistanceCategory, DistanceContext, Race, RaceStatus};

/// Request payload for publishing a new race together with its distances
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRaceRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Location must be between 1 and 255 characters"
    ))]
    pub location: String,

    pub race_date: NaiveDate,

    pub organizer_id: Option<Uuid>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "A race needs at least one distance category"))]
    #[validate(nested)]
    pub distances: Vec<CreateDistanceCategoryRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDistanceCategoryRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "validate_distance_km"))]
    pub distance_km: Decimal,

    #[validate(custom(function = "validate_fee"))]
    pub registration_fee: Decimal,

    #[validate(range(min = 1, message = "Max participants must be at least 1"))]
    pub max_participants: i32,

    #[schema(value_type = String, example = "08:30:00")]
    pub start_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateRaceStatusRequest {
    pub status: RaceStatus,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RaceFilter {
    pub status: Option<RaceStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RaceResponse {
    pub race_id: Uuid,
    pub name: String,
    pub location: String,
    pub race_date: NaiveDate,
    pub status: RaceStatus,
    pub organizer_id: Option<Uuid>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Race with every distance category and its live occupancy
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RaceDetailResponse {
    #[serde(flatten)]
    pub race: RaceResponse,
    pub distances: Vec<DistanceCategoryResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistanceCategoryResponse {
    pub distance_category_id: Uuid,
    pub race_id: Uuid,
    pub name: String,
    pub distance_km: Decimal,
    pub registration_fee: Decimal,
    pub max_participants: i32,
    #[schema(value_type = String, example = "08:30:00")]
    pub start_time: NaiveTime,
    pub registered_count: i64,
    pub available_slots: i64,
    pub is_full: bool,
}

impl DistanceCategoryResponse {
    pub fn new(category: DistanceCategory, registered_count: i64) -> Self {
        let available_slots = (i64::from(category.max_participants) - registered_count).max(0);
        Self {
            distance_category_id: category.distance_category_id,
            race_id: category.race_id,
            name: category.name,
            distance_km: category.distance_km,
            registration_fee: category.registration_fee,
            max_participants: category.max_participants,
            start_time: category.start_time,
            registered_count,
            available_slots,
            is_full: available_slots == 0,
        }
    }
}

/// Distance category with the race facts that decide whether it is open
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistanceContextResponse {
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
    #[schema(value_type = String, example = "08:30:00")]
    pub start_time: NaiveTime,
}

impl From<DistanceContext> for DistanceContextResponse {
    fn from(context: DistanceContext) -> Self {
        Self {
            distance_category_id: context.distance_category_id,
            race_id: context.race_id,
            race_name: context.race_name,
            race_location: context.race_location,
            race_date: context.race_date,
            race_status: context.race_status,
            distance_name: context.distance_name,
            distance_km: context.distance_km,
            registration_fee: context.registration_fee,
            max_participants: context.max_participants,
            start_time: context.start_time,
        }
    }
}

fn validate_distance_km(distance_km: &Decimal) -> Result<(), validator::ValidationError> {
    if *distance_km > Decimal::ZERO && *distance_km < Decimal::from(10_000) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_distance_km"))
    }
}

fn validate_fee(fee: &Decimal) -> Result<(), validator::ValidationError> {
    if *fee >= Decimal::ZERO {
        Ok(())
    } else {
        Err(validator::ValidationError::new("negative_fee"))
    }
}

impl From<Race> for RaceResponse {
    fn from(race: Race) -> Self {
        Self {
            race_id: race.race_id,
            name: race.name,
            location: race.location,
            race_date: race.race_date,
            status: race.status,
            organizer_id: race.organizer_id,
            description: race.description,
            created_at: race.created_at,
        }
    }
}
