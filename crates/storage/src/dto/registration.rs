use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{PaymentStatus, RegistrationDetail};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub distance_category_id: Uuid,
}

/// Registration as shown to its runner, with the derived display fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationSummary {
    pub registration_id: Uuid,
    pub payment_status: PaymentStatus,
    pub display_status: String,
    pub can_cancel: bool,
    pub bib_number: Option<i32>,
    pub registered_at: NaiveDateTime,
    pub race: RaceInfo,
    pub distance: DistanceInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RaceInfo {
    pub race_id: Uuid,
    pub name: String,
    pub location: String,
    pub race_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistanceInfo {
    pub distance_category_id: Uuid,
    pub name: String,
    pub distance_km: Decimal,
    pub registration_fee: Decimal,
    #[schema(value_type = String, example = "08:30:00")]
    pub start_time: NaiveTime,
}

impl RegistrationSummary {
    pub fn from_detail(detail: RegistrationDetail, today: NaiveDate) -> Self {
        let display_status = detail.display_status(today).to_string();
        let can_cancel = detail.can_cancel(today);

        Self {
            registration_id: detail.registration_id,
            payment_status: detail.payment_status,
            display_status,
            can_cancel,
            bib_number: detail.bib_number,
            registered_at: detail.registered_at,
            race: RaceInfo {
                race_id: detail.race_id,
                name: detail.race_name,
                location: detail.race_location,
                race_date: detail.race_date,
            },
            distance: DistanceInfo {
                distance_category_id: detail.distance_category_id,
                name: detail.distance_name,
                distance_km: detail.distance_km,
                registration_fee: detail.registration_fee,
                start_time: detail.start_time,
            },
        }
    }
}
