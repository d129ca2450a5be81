use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{FinishTime, ResultDetail, ResultStatus};

/// Outcome of a registration, as reported by timing
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecordResultRequest {
    pub finish_time: Option<FinishTime>,

    #[validate(range(min = 1, message = "Overall rank must be a positive integer"))]
    pub overall_rank: Option<i32>,

    #[validate(range(min = 1, message = "Gender rank must be a positive integer"))]
    pub gender_rank: Option<i32>,

    #[validate(range(min = 1, message = "Age category rank must be a positive integer"))]
    pub age_category_rank: Option<i32>,

    pub status: ResultStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResultSummary {
    pub result_id: Uuid,
    pub registration_id: Uuid,
    pub status: ResultStatus,
    pub finish_time: Option<FinishTime>,
    pub formatted_time: Option<String>,
    /// Minutes per kilometre
    pub average_pace: Option<Decimal>,
    pub formatted_pace: Option<String>,
    pub overall_rank: Option<i32>,
    pub gender_rank: Option<i32>,
    pub age_category_rank: Option<i32>,
    pub is_top_three: bool,
    pub is_top_ten: bool,
    pub recorded_at: NaiveDateTime,
    pub race_id: Uuid,
    pub race_name: String,
    pub race_date: NaiveDate,
    pub distance_name: String,
    pub distance_km: Decimal,
}

impl From<ResultDetail> for ResultSummary {
    fn from(detail: ResultDetail) -> Self {
        Self {
            formatted_time: detail.finish_time.map(|t| t.to_string()),
            average_pace: detail.average_pace(),
            formatted_pace: detail.formatted_pace(),
            is_top_three: detail.is_top_three(),
            is_top_ten: detail.is_top_ten(),
            result_id: detail.result_id,
            registration_id: detail.registration_id,
            status: detail.status,
            finish_time: detail.finish_time,
            overall_rank: detail.overall_rank,
            gender_rank: detail.gender_rank,
            age_category_rank: detail.age_category_rank,
            recorded_at: detail.recorded_at,
            race_id: detail.race_id,
            race_name: detail.race_name,
            race_date: detail.race_date,
            distance_name: detail.distance_name,
            distance_km: detail.distance_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_must_be_positive() {
        let request: RecordResultRequest = serde_json::from_str(
            r#"{"finish_time": "0:41:12", "overall_rank": 0, "status": "finished"}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());

        let request: RecordResultRequest = serde_json::from_str(
            r#"{"finish_time": "0:41:12", "overall_rank": 4, "gender_rank": 2, "status": "finished"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.finish_time.map(FinishTime::seconds), Some(2472));
    }

    #[test]
    fn test_status_values() {
        for (raw, expected) in [
            ("\"did_not_start\"", ResultStatus::DidNotStart),
            ("\"finished\"", ResultStatus::Finished),
            ("\"dnf\"", ResultStatus::Dnf),
        ] {
            assert_eq!(serde_json::from_str::<ResultStatus>(raw).unwrap(), expected);
        }
        assert!(serde_json::from_str::<ResultStatus>("\"won\"").is_err());
    }

    #[test]
    fn test_summary_derives_pace_and_podium_flags() {
        let detail = ResultDetail {
            result_id: Uuid::new_v4(),
            registration_id: Uuid::new_v4(),
            finish_time: Some(FinishTime::from_hms(0, 50, 0).unwrap()),
            overall_rank: Some(3),
            gender_rank: Some(1),
            age_category_rank: None,
            status: ResultStatus::Finished,
            recorded_at: NaiveDate::from_ymd_opt(2026, 5, 3)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            race_id: Uuid::new_v4(),
            race_name: "River Run".to_string(),
            race_date: NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
            distance_name: "10K".to_string(),
            distance_km: Decimal::from(10),
        };

        let summary = ResultSummary::from(detail);
        assert_eq!(summary.formatted_time.as_deref(), Some("0:50:00"));
        assert_eq!(summary.average_pace, Some(Decimal::new(500, 2)));
        assert_eq!(summary.formatted_pace.as_deref(), Some("5:00 /km"));
        assert!(summary.is_top_three);
        assert!(summary.is_top_ten);
    }
}
