//! Authorization gate
//!
//! Resolves a `Bearer <token>` header to a live user and enforces roles.
//! Protected handlers take one of the extractors below; authentication
//! always runs before the role check, so a bad token is a 401 even on an
//! endpoint the caller's role could never use.

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use job_board_shared::{AuthError, UserRole};
use tracing::warn;

/// Extract the token from an `Authorization` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}

/// Resolve a raw `Authorization` header to the user it names
pub async fn authenticate(state: &AppState, header: Option<&str>) -> Result<UserRecord, ApiError> {
    let token = bearer_token(header)?;

    let user_id = state.jwt().verify(token).map_err(|e| {
        warn!(error = %e, "Rejected bearer token");
        ApiError::from(e)
    })?;

    UserRepository::find_by_id(state.db(), user_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            warn!(user_id, "Token names an unknown or deleted user");
            ApiError::Unauthorized("User not found".to_string())
        })
}

/// Strict role check; there is no role hierarchy
pub fn require_role(user: &UserRecord, role: UserRole) -> Result<(), ApiError> {
    if user.role == role {
        return Ok(());
    }

    warn!(user_id = user.id, has = %user.role, needs = %role, "Role check failed");
    let message = match role {
        UserRole::Admin => "Only admins can access this endpoint",
        UserRole::Applicant => "Only applicants can access this endpoint",
    };
    Err(ApiError::Forbidden(message.to_string()))
}

fn authorization_header(parts: &Parts) -> Result<Option<&str>, ApiError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| ApiError::from(AuthError::MalformedHeader)))
        .transpose()
}

/// Any authenticated user
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserRecord);

/// An authenticated user with the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub UserRecord);

/// An authenticated user with the applicant role
#[derive(Debug, Clone)]
pub struct ApplicantUser(pub UserRecord);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let header = authorization_header(parts)?;
        let user = authenticate(&app_state, header).await?;
        Ok(AuthUser(user))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, UserRole::Admin)?;
        Ok(AdminUser(user))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for ApplicantUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        require_role(&user, UserRole::Applicant)?;
        Ok(ApplicantUser(user))
    }
}
