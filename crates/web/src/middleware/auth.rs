//! Request authentication.
//!
//! Two credentials exist: administrative API keys sent in `X-API-Key`, which
//! guard catalog and result management, and HS256 runner tokens sent as
//! `Authorization: Bearer <token>`, which identify the runner a registration
//! request acts for.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WebError;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const RUNNER_ROLE: &str = "runner";

/// Middleware guarding administrative routes
pub async fn require_auth(
    State(api_keys): State<ApiKeys>,
    req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|key| api_keys.is_valid(key));

    match provided {
        Some(true) => Ok(next.run(req).await),
        Some(false) => {
            tracing::warn!(path = %req.uri().path(), "Invalid API key attempt");
            Err(WebError::Unauthorized)
        }
        None => Err(WebError::Unauthorized),
    }
}

#[derive(Clone, Default)]
pub struct ApiKeys {
    keys: Arc<HashSet<String>>,
}

impl ApiKeys {
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let keys = keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            keys: Arc::new(keys),
        }
    }

    pub fn is_valid(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Claims carried by a runner token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signing and verification keys for runner tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn issue(&self, runner_id: Uuid) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        self.issue_with_role(runner_id, RUNNER_ROLE)
    }

    pub fn issue_with_role(
        &self,
        subject: Uuid,
        role: &str,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = now + self.ttl;

        let claims = Claims {
            sub: subject,
            role: role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Checks signature and expiry, returning the embedded claims
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}

/// The runner a request acts for, taken from its bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthRunner {
    pub runner_id: Uuid,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthRunner
where
    TokenKeys: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(WebError::Unauthorized)?;

        let claims = TokenKeys::from_ref(state).validate(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            WebError::Unauthorized
        })?;

        if claims.role != RUNNER_ROLE {
            return Err(WebError::Forbidden);
        }

        Ok(AuthRunner {
            runner_id: claims.sub,
        })
    }
}
