use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Runner {
    pub runner_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub created_at: chrono::NaiveDateTime,
}

impl Runner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
