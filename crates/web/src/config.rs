use anyhow::{Context, Result};

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub api_keys: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Cannot load JWT_SECRET env variable")?;
        anyhow::ensure!(!jwt_secret.trim().is_empty(), "JWT_SECRET must not be empty");

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            database_max_connections: optional_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            jwt_secret,
            token_ttl_minutes: optional_var("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?,
            request_timeout_secs: optional_var(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        })
    }
}

fn optional_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid number")),
        Err(_) => Ok(default),
    }
}
