use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    /// Only live registrations occupy a seat.
    pub fn counts_toward_capacity(self) -> bool {
        self != Self::Cancelled
    }

    pub fn display_label(self, race_is_upcoming: bool) -> &'static str {
        match self {
            Self::Pending => "Pending Payment",
            Self::Paid if race_is_upcoming => "Confirmed",
            Self::Paid => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
    pub registration_id: Uuid,
    pub runner_id: Uuid,
    pub distance_category_id: Uuid,
    pub registered_at: NaiveDateTime,
    pub payment_status: PaymentStatus,
    pub bib_number: Option<i32>,
}

/// Registration row joined with its distance category and race.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationDetail {
    pub registration_id: Uuid,
    pub runner_id: Uuid,
    pub distance_category_id: Uuid,
    pub registered_at: NaiveDateTime,
    pub payment_status: PaymentStatus,
    pub bib_number: Option<i32>,
    pub race_id: Uuid,
    pub race_name: String,
    pub race_location: String,
    pub race_date: NaiveDate,
    pub distance_name: String,
    pub distance_km: Decimal,
    pub registration_fee: Decimal,
    pub start_time: NaiveTime,
}

impl RegistrationDetail {
    pub fn race_is_upcoming(&self, today: NaiveDate) -> bool {
        self.race_date > today
    }

    pub fn can_cancel(&self, today: NaiveDate) -> bool {
        self.race_is_upcoming(today) && self.payment_status != PaymentStatus::Cancelled
    }

    pub fn display_status(&self, today: NaiveDate) -> &'static str {
        self.payment_status
            .display_label(self.race_is_upcoming(today))
    }
}
