//! User repository for database operations

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use job_board_shared::types::{ProfileResponse, UserResponse};
use job_board_shared::UserRole;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, name, email, address, user_type, password_hash, \
                            profile_headline, created_at, updated_at";

/// Raw user row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub user_type: String,
    pub password_hash: String,
    pub profile_headline: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User record with a typed role
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub role: UserRole,
    pub password_hash: String,
    pub profile_headline: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> Result<Self> {
        let role = row
            .user_type
            .parse::<UserRole>()
            .map_err(|e| anyhow::anyhow!("user {} has invalid role: {}", row.id, e))?;

        Ok(Self {
            id: row.id,
            name: row.name,
            email: row.email,
            address: row.address,
            role,
            password_hash: row.password_hash,
            profile_headline: row.profile_headline,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl UserRecord {
    /// Full public view; the password hash is dropped here
    pub fn into_response(self, profile: Option<ProfileResponse>) -> UserResponse {
        UserResponse {
            id: self.id,
            name: self.name,
            email: self.email,
            address: self.address,
            user_type: self.role,
            profile_headline: self.profile_headline,
            created_at: self.created_at,
            updated_at: self.updated_at,
            profile,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub role: UserRole,
    pub password_hash: String,
    pub profile_headline: Option<String>,
}

pub(crate) fn into_records(rows: Vec<UserRow>) -> Result<Vec<UserRecord>> {
    rows.into_iter().map(UserRecord::try_from).collect()
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    ///
    /// A concurrent signup with the same email fails on the unique index;
    /// callers detect that with `db::is_unique_violation`.
    pub async fn create(pool: &PgPool, input: CreateUser) -> Result<UserRecord> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (name, email, address, user_type, password_hash, profile_headline)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.address)
        .bind(input.role.as_str())
        .bind(&input.password_hash)
        .bind(&input.profile_headline)
        .fetch_one(pool)
        .await?;

        row.try_into()
    }

    /// Find a live user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await
        .context("failed to look up user by email")?;

        row.map(UserRecord::try_from).transpose()
    }

    /// Find a live user by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to look up user by id")?;

        row.map(UserRecord::try_from).transpose()
    }

    /// Find a user by ID whether or not they were soft-deleted
    ///
    /// Used where history must stay readable, e.g. the poster of a job.
    pub async fn find_by_id_with_deleted(pool: &PgPool, id: i64) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }

    /// Find a live user by ID, only if they hold `role`
    pub async fn find_by_id_and_role(
        pool: &PgPool,
        id: i64,
        role: UserRole,
    ) -> Result<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE id = $1 AND user_type = $2 AND deleted_at IS NULL"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }

    /// List all live users holding `role`, oldest first
    pub async fn list_by_role(pool: &PgPool, role: UserRole) -> Result<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE user_type = $1 AND deleted_at IS NULL \
             ORDER BY id"
        ))
        .bind(role.as_str())
        .fetch_all(pool)
        .await?;

        into_records(rows)
    }

    /// Check if email is taken (soft-deleted accounts still hold their email)
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }
}
