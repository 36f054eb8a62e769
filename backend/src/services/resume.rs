//! Résumé ingestion
//!
//! Validates an upload, hands it to the external parser and stores the
//! extracted fields as the applicant's profile. The file itself is not kept.

use crate::error::ApiError;
use crate::repositories::{ProfileRecord, ProfileRepository, UpsertProfile, UserRecord};
use crate::resume_parser::{ParserError, ResumeFormat, ResumeParserClient};
use sqlx::PgPool;
use tracing::{error, info};

/// Service for résumé uploads
pub struct ResumeService;

impl ResumeService {
    /// Parse an uploaded résumé and replace the applicant's profile with it
    pub async fn ingest(
        pool: &PgPool,
        parser: &ResumeParserClient,
        applicant: &UserRecord,
        content_type: Option<&str>,
        file: Vec<u8>,
    ) -> Result<ProfileRecord, ApiError> {
        let format = ResumeFormat::from_content_type(content_type)?;

        if file.is_empty() {
            return Err(ApiError::BadRequest("Resume file is empty".to_string()));
        }

        if !parser.is_configured() {
            error!("Resume upload attempted without a parser API key");
            return Err(ParserError::NotConfigured.into());
        }

        let parsed = parser.parse(file).await?;

        let profile = ProfileRepository::upsert(
            pool,
            UpsertProfile {
                user_id: applicant.id,
                resume_file_address: String::new(),
                skills: parsed.skills,
                education: parsed.education,
                experience: parsed.experience,
                name: applicant.name.clone(),
                email: applicant.email.clone(),
                phone: parsed.phone,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(user_id = applicant.id, ?format, profile_id = profile.id, "Resume ingested");
        Ok(profile)
    }
}
