//! JWT authentication.
//!
//! Tokens are HS256 signed with `auth.jwt_secret` and carry the user id,
//! email and role name. The middleware validates the bearer token and puts
//! the caller's [`AuthUser`] into the request extensions, where handlers
//! pick it up as an extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::AppError;
use super::state::AppState;
use crate::config::AuthSettings;
use crate::models::role::ADMIN_ROLE;
use crate::models::{EntityId, User, UserId};

/// JWT payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// The caller of an authenticated request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    /// `None` when authentication is disabled.
    pub user_id: Option<UserId>,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    /// Caller used for every request when authentication is disabled.
    pub fn system() -> Self {
        Self {
            user_id: None,
            email: "system".to_string(),
            role: ADMIN_ROLE.to_string(),
        }
    }

    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let user_id = UserId::parse(&claims.sub)
            .ok_or_else(|| AppError::Unauthorized("invalid token subject".to_string()))?;
        Ok(Self {
            user_id: Some(user_id),
            email: claims.email.clone(),
            role: claims.role.clone(),
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ADMIN_ROLE)
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "the {} role is required",
                ADMIN_ROLE
            )))
        }
    }

    /// Allow the account owner and administrators.
    pub fn require_self_or_admin(&self, user_id: UserId) -> Result<(), AppError> {
        if self.is_admin() || self.user_id == Some(user_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "not allowed to access another user's data".to_string(),
            ))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("authentication required".to_string()))
    }
}

/// Sign a token for `user`. Returns the token and its lifetime in seconds.
pub fn issue_token(user: &User, settings: &AuthSettings) -> Result<(String, i64), AppError> {
    let now = Utc::now();
    let ttl = Duration::minutes(settings.token_ttl_minutes);
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role_name().unwrap_or_default().to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

    Ok((token, ttl.num_seconds()))
}

pub fn verify_token(token: &str, settings: &AuthSettings) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("Rejected token: {}", e);
        AppError::Unauthorized("invalid or expired token".to_string())
    })
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Middleware guarding the `/api` routes.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let settings = &state.config.auth;
    let (mut parts, body) = request.into_parts();

    let caller = if settings.enabled {
        let token = bearer_token(&parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;
        AuthUser::from_claims(&verify_token(token, settings)?)?
    } else {
        AuthUser::system()
    };

    parts.extensions.insert(caller);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
