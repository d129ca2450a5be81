use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A completion time stored as whole seconds.
///
/// Serialized as `H:MM:SS` on the wire and as an `INTEGER` of seconds in the
/// database, so ordering and minimum lookups stay numeric.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
    ToSchema,
)]
#[sqlx(transparent)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "3:29:45")]
pub struct FinishTime(i32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinishTimeError {
    #[error("finish time must be formatted as H:MM:SS or MM:SS")]
    Format,

    #[error("minutes and seconds must be below 60")]
    OutOfRange,

    #[error("finish time cannot be negative")]
    Negative,

    #[error("finish time is too large")]
    TooLarge,
}

impl FinishTime {
    pub fn from_seconds(seconds: i32) -> Result<Self, FinishTimeError> {
        if seconds < 0 {
            return Err(FinishTimeError::Negative);
        }
        Ok(Self(seconds))
    }

    pub fn from_hms(hours: i32, minutes: i32, seconds: i32) -> Result<Self, FinishTimeError> {
        if !(0..60).contains(&minutes) {
            return Err(FinishTimeError::OutOfRange);
        }
        Self::from_parts(i64::from(hours), i64::from(minutes), i64::from(seconds))
    }

    /// Totals past `i32::MAX` seconds are `TooLarge`.
    fn from_parts(hours: i64, minutes: i64, seconds: i64) -> Result<Self, FinishTimeError> {
        if !(0..60).contains(&seconds) {
            return Err(FinishTimeError::OutOfRange);
        }
        let total = hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(seconds))
            .ok_or(FinishTimeError::TooLarge)?;
        if total < 0 {
            return Err(FinishTimeError::Negative);
        }
        i32::try_from(total)
            .map(Self)
            .map_err(|_| FinishTimeError::TooLarge)
    }

    pub fn seconds(self) -> i32 {
        self.0
    }

    pub fn minutes(self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(60)
    }

    /// Average pace in minutes per kilometre, rounded to two decimals.
    /// `None` when the distance is not positive.
    pub fn pace_per_km(self, distance_km: Decimal) -> Option<Decimal> {
        if distance_km <= Decimal::ZERO {
            return None;
        }
        Some((self.minutes() / distance_km).round_dp(2))
    }

    /// Pace formatted as `M:SS /km`.
    pub fn formatted_pace(self, distance_km: Decimal) -> Option<String> {
        if distance_km <= Decimal::ZERO {
            return None;
        }
        let secs_per_km = (Decimal::from(self.0) / distance_km).round();
        let secs_per_km: i64 = secs_per_km.try_into().ok()?;
        Some(format!("{}:{:02} /km", secs_per_km / 60, secs_per_km % 60))
    }
}

impl fmt::Display for FinishTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{hours}:{minutes:02}:{seconds:02}")
    }
}

impl FromStr for FinishTime {
    type Err = FinishTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .trim()
            .split(':')
            .map(|p| {
                if p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()) {
                    return Err(FinishTimeError::Format);
                }
                p.parse::<i64>().map_err(|_| FinishTimeError::TooLarge)
            })
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [_, minutes, _] if !(0..60).contains(minutes) => Err(FinishTimeError::OutOfRange),
            [hours, minutes, seconds] => Self::from_parts(*hours, *minutes, *seconds),
            [minutes, seconds] => Self::from_parts(0, *minutes, *seconds),
            _ => Err(FinishTimeError::Format),
        }
    }
}

impl TryFrom<String> for FinishTime {
    type Error = FinishTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FinishTime> for String {
    fn from(value: FinishTime) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_hours_minutes_seconds() {
        let time = FinishTime::from_hms(2, 0, 0).unwrap();
        assert_eq!(time.to_string(), "2:00:00");

        let time = FinishTime::from_seconds(25 * 60 + 7).unwrap();
        assert_eq!(time.to_string(), "0:25:07");
    }

    #[test]
    fn test_parses_both_layouts() {
        assert_eq!("1:45:30".parse::<FinishTime>().unwrap().seconds(), 6330);
        assert_eq!("01:45:30".parse::<FinishTime>().unwrap().seconds(), 6330);
        assert_eq!("25:00".parse::<FinishTime>().unwrap().seconds(), 1500);
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert_eq!("1:75:00".parse::<FinishTime>(), Err(FinishTimeError::OutOfRange));
        assert_eq!("abc".parse::<FinishTime>(), Err(FinishTimeError::Format));
        assert_eq!("1::00".parse::<FinishTime>(), Err(FinishTimeError::Format));
        assert_eq!("-1:00:00".parse::<FinishTime>(), Err(FinishTimeError::Format));
        assert_eq!(FinishTime::from_seconds(-5), Err(FinishTimeError::Negative));
    }

    #[test]
    fn test_rejects_times_beyond_storage_range() {
        assert_eq!(
            "600000:00:00".parse::<FinishTime>(),
            Err(FinishTimeError::TooLarge)
        );
        assert_eq!(
            "40000000:00".parse::<FinishTime>(),
            Err(FinishTimeError::TooLarge)
        );
        assert_eq!(
            "99999999999999999999:00:00".parse::<FinishTime>(),
            Err(FinishTimeError::TooLarge)
        );
        assert_eq!(
            FinishTime::from_hms(i32::MAX, 59, 59),
            Err(FinishTimeError::TooLarge)
        );
        assert!(serde_json::from_str::<FinishTime>("\"600000:00:00\"").is_err());

        // largest whole-hour time that still fits
        assert_eq!(
            "596523:00:00".parse::<FinishTime>().unwrap().seconds(),
            596_523 * 3600
        );
    }

    #[test]
    fn test_pace_per_km() {
        let time = FinishTime::from_hms(0, 25, 0).unwrap();
        assert_eq!(time.pace_per_km(Decimal::from(5)), Some(Decimal::new(500, 2)));
        assert_eq!(time.formatted_pace(Decimal::from(5)).as_deref(), Some("5:00 /km"));

        let marathon = FinishTime::from_hms(3, 30, 0).unwrap();
        let km = Decimal::new(42195, 3);
        assert_eq!(marathon.pace_per_km(km), Some(Decimal::new(498, 2)));
        assert_eq!(marathon.formatted_pace(km).as_deref(), Some("4:59 /km"));
    }

    #[test]
    fn test_pace_needs_positive_distance() {
        let time = FinishTime::from_seconds(600).unwrap();
        assert_eq!(time.pace_per_km(Decimal::ZERO), None);
        assert_eq!(time.formatted_pace(Decimal::ZERO), None);
    }

    #[test]
    fn test_serde_uses_clock_format() {
        let time = FinishTime::from_hms(1, 2, 3).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"1:02:03\"");

        let back: FinishTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
        assert!(serde_json::from_str::<FinishTime>("\"nope\"").is_err());
    }
}
