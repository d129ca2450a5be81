use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Runner;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRunnerRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1 and 255 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1 and 255 characters"
    ))]
    pub last_name: String,

    #[validate(email(message = "Email must be a valid address"))]
    #[validate(length(max = 255))]
    pub email: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RunnerResponse {
    pub runner_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub created_at: NaiveDateTime,
}

fn validate_gender(gender: &str) -> Result<(), validator::ValidationError> {
    const VALID_GENDERS: &[&str] = &["M", "F", "X"];

    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_gender"))
    }
}

impl From<Runner> for RunnerResponse {
    fn from(runner: Runner) -> Self {
        Self {
            runner_id: runner.runner_id,
            first_name: runner.first_name,
            last_name: runner.last_name,
            email: runner.email,
            gender: runner.gender,
            created_at: runner.created_at,
        }
    }
}
