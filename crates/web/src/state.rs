use axum::extract::FromRef;
use storage::Database;

use crate::config::Config;
use crate::middleware::auth::{ApiKeys, TokenKeys};

/// Shared application state; handlers pull the piece they need through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub api_keys: ApiKeys,
    pub tokens: TokenKeys,
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for ApiKeys {
    fn from_ref(state: &AppState) -> Self {
        state.api_keys.clone()
    }
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl AppState {
    pub fn from_config(db: Database, config: &Config) -> Self {
        Self {
            db,
            api_keys: ApiKeys::from_comma_separated(&config.api_keys),
            tokens: TokenKeys::new(&config.jwt_secret, config.token_ttl_minutes),
        }
    }
}
