//! Profile repository: parsed résumé data, one row per applicant

use anyhow::Result;
use chrono::{DateTime, Utc};
use job_board_shared::types::ProfileResponse;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::HashMap;

const PROFILE_COLUMNS: &str = "id, user_id, resume_file_address, skills, education, experience, \
                               name, email, phone, created_at, updated_at";

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub id: i64,
    pub user_id: i64,
    pub resume_file_address: String,
    pub skills: Json<Value>,
    pub education: Json<Value>,
    pub experience: Json<Value>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(record: ProfileRecord) -> Self {
        ProfileResponse {
            id: record.id,
            user_id: record.user_id,
            resume_file_address: record.resume_file_address,
            skills: record.skills.0,
            education: record.education.0,
            experience: record.experience.0,
            name: record.name,
            email: record.email,
            phone: record.phone,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Input for creating or replacing a profile
#[derive(Debug, Clone)]
pub struct UpsertProfile {
    pub user_id: i64,
    pub resume_file_address: String,
    pub skills: Value,
    pub education: Value,
    pub experience: Value,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Profile repository for database operations
pub struct ProfileRepository;

impl ProfileRepository {
    /// Create the user's profile, or replace it if one exists
    pub async fn upsert(pool: &PgPool, input: UpsertProfile) -> Result<ProfileRecord> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            r#"
            INSERT INTO profiles
                (user_id, resume_file_address, skills, education, experience, name, email, phone)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                resume_file_address = EXCLUDED.resume_file_address,
                skills = EXCLUDED.skills,
                education = EXCLUDED.education,
                experience = EXCLUDED.experience,
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                updated_at = NOW()
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(input.user_id)
        .bind(&input.resume_file_address)
        .bind(Json(&input.skills))
        .bind(Json(&input.education))
        .bind(Json(&input.experience))
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get a user's profile
    pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Get the profiles of several users, keyed by user ID
    pub async fn find_by_users(
        pool: &PgPool,
        user_ids: &[i64],
    ) -> Result<HashMap<i64, ProfileRecord>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let records = sqlx::query_as::<_, ProfileRecord>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id = ANY($1)"
        ))
        .bind(user_ids)
        .fetch_all(pool)
        .await?;

        Ok(records.into_iter().map(|p| (p.user_id, p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_converts_to_response() {
        let record = ProfileRecord {
            id: 3,
            user_id: 9,
            resume_file_address: String::new(),
            skills: Json(serde_json::json!(["rust", "sql"])),
            education: Json(Value::Null),
            experience: Json(serde_json::json!([{"title": "Engineer"}])),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: "555-0100".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = ProfileResponse::from(record);
        assert_eq!(response.user_id, 9);
        assert_eq!(response.skills[0], "rust");
        assert!(response.education.is_null());
        assert_eq!(response.phone, "555-0100");
    }
}
