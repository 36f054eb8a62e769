//! User service: signup, login and applicant rosters

use crate::auth::{JwtService, PasswordService};
use crate::db;
use crate::error::ApiError;
use crate::repositories::{CreateUser, ProfileRepository, UserRecord, UserRepository};
use job_board_shared::types::{LoginRequest, ProfileResponse, SignupRequest, UserResponse};
use job_board_shared::validation::{missing_fields, validate_email};
use job_board_shared::UserRole;
use sqlx::PgPool;
use tracing::info;

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// The email pre-check gives the common case a clean `Conflict`; the
    /// unique index catches the race between two concurrent signups.
    pub async fn signup(pool: &PgPool, req: SignupRequest) -> Result<UserRecord, ApiError> {
        let missing = missing_fields(&[
            ("name", req.name.as_str()),
            ("email", req.email.as_str()),
            ("password", req.password.as_str()),
            ("userType", req.user_type.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(ApiError::Validation(
                "name, email, password, and userType are required fields".to_string(),
            ));
        }

        let role: UserRole = req.user_type.trim().parse().map_err(|_| {
            ApiError::Validation("userType should be either applicant or admin".to_string())
        })?;

        let email = req.email.trim().to_string();
        validate_email(&email).map_err(ApiError::Validation)?;

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict(
                "User with that email already exists".to_string(),
            ));
        }

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let input = CreateUser {
            name: req.name.trim().to_string(),
            email,
            address: non_empty(req.address),
            role,
            password_hash,
            profile_headline: non_empty(req.profile_headline),
        };

        let user = UserRepository::create(pool, input).await.map_err(|e| {
            if db::is_unique_violation(&e) {
                ApiError::Conflict("User with that email already exists".to_string())
            } else {
                ApiError::Internal(e)
            }
        })?;

        info!(user_id = user.id, role = %user.role, "User signed up");
        Ok(user)
    }

    /// Check credentials and issue a token
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        req: LoginRequest,
    ) -> Result<String, ApiError> {
        let missing = missing_fields(&[
            ("email", req.email.as_str()),
            ("password", req.password.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(ApiError::Validation(
                "email and password are required fields".to_string(),
            ));
        }

        let user = UserRepository::find_by_email(pool, req.email.trim())
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid password".to_string()));
        }

        let token = jwt_service.issue(user.id).map_err(ApiError::Internal)?;

        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    /// All applicants with their profiles
    pub async fn list_applicants(pool: &PgPool) -> Result<Vec<UserResponse>, ApiError> {
        let applicants = UserRepository::list_by_role(pool, UserRole::Applicant)
            .await
            .map_err(ApiError::Internal)?;

        with_profiles(pool, applicants).await
    }

    /// One applicant with their profile
    pub async fn get_applicant(pool: &PgPool, id: i64) -> Result<UserResponse, ApiError> {
        let applicant = UserRepository::find_by_id_and_role(pool, id, UserRole::Applicant)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Applicant not found".to_string()))?;

        let profile = ProfileRepository::find_by_user(pool, applicant.id)
            .await
            .map_err(ApiError::Internal)?
            .map(ProfileResponse::from);

        Ok(applicant.into_response(profile))
    }
}

/// Attach each user's profile, if any, and drop password hashes
pub(crate) async fn with_profiles(
    pool: &PgPool,
    users: Vec<UserRecord>,
) -> Result<Vec<UserResponse>, ApiError> {
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    let mut profiles = ProfileRepository::find_by_users(pool, &ids)
        .await
        .map_err(ApiError::Internal)?;

    Ok(users
        .into_iter()
        .map(|user| {
            let profile = profiles.remove(&user.id).map(ProfileResponse::from);
            user.into_response(profile)
        })
        .collect())
}
