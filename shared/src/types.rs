//! API request and response types

use crate::models::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Signup form
///
/// Fields default to empty so that missing values surface as validation
/// errors instead of extractor rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "userType")]
    pub user_type: String,
    pub address: Option<String>,
    #[serde(rename = "profileHeadline")]
    pub profile_headline: Option<String>,
}

/// Login form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Job posting form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
}

/// Query string for `GET /jobs/apply`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyJobQuery {
    pub job_id: Option<String>,
}

/// Generic `{message}` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Minimal public projection of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Parsed résumé data attached to an applicant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub user_id: i64,
    pub resume_file_address: String,
    pub skills: serde_json::Value,
    pub education: serde_json::Value,
    pub experience: serde_json::Value,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full public view of a user (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub user_type: UserRole,
    pub profile_headline: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileResponse>,
}

/// Job as shown in the public listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_by_id: i64,
    pub posted_on: DateTime<Utc>,
    pub total_applications: i32,
    pub posted_by: UserSummary,
}

/// Job with its poster and applicants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_by_id: i64,
    pub posted_on: DateTime<Utc>,
    pub total_applications: i32,
    pub posted_by: UserResponse,
    pub applicants: Vec<UserResponse>,
}

/// `GET /jobs` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobSummary>,
}

/// `GET /admin/applicants` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantsResponse {
    pub applicants: Vec<UserResponse>,
}

/// `GET /admin/applicant/:applicant_id` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantResponse {
    pub applicant: UserResponse,
}
