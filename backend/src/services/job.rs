//! Job service
//!
//! Posting, listing and reading jobs, and the apply operation.

use super::user::with_profiles;
use crate::error::ApiError;
use crate::repositories::{
    ApplyOutcome, CreateJob, JobRecord, JobRepository, ProfileRepository, UserRecord,
    UserRepository,
};
use chrono::Utc;
use job_board_shared::types::{CreateJobRequest, JobDetail, JobSummary, ProfileResponse};
use job_board_shared::validation::missing_fields;
use sqlx::PgPool;
use tracing::{info, warn};

/// Job service for postings and applications
pub struct JobService;

impl JobService {
    /// Post a new job on behalf of `poster`
    pub async fn create_job(
        pool: &PgPool,
        poster: &UserRecord,
        req: CreateJobRequest,
    ) -> Result<JobRecord, ApiError> {
        let missing = missing_fields(&[
            ("title", req.title.as_str()),
            ("description", req.description.as_str()),
            ("companyName", req.company_name.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(ApiError::Validation(
                "title, description, and companyName are required fields".to_string(),
            ));
        }

        let job = JobRepository::create(
            pool,
            CreateJob {
                posted_by_id: poster.id,
                title: req.title.trim().to_string(),
                description: req.description.trim().to_string(),
                company_name: req.company_name.trim().to_string(),
                posted_on: Utc::now(),
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(job_id = job.id, posted_by = poster.id, "Job created");
        Ok(job)
    }

    /// All live jobs, each with a reduced view of its poster
    pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobSummary>, ApiError> {
        let jobs = JobRepository::list_with_posters(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(jobs.into_iter().map(JobSummary::from).collect())
    }

    /// One job with its full poster and applicant list
    pub async fn get_job(pool: &PgPool, id: i64) -> Result<JobDetail, ApiError> {
        let job = JobRepository::find_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

        let poster = UserRepository::find_by_id_with_deleted(pool, job.posted_by_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!(
                    "job {} references missing poster {}",
                    job.id,
                    job.posted_by_id
                ))
            })?;

        let poster_profile = ProfileRepository::find_by_user(pool, poster.id)
            .await
            .map_err(ApiError::Internal)?
            .map(ProfileResponse::from);

        let applicants = JobRepository::applicants(pool, job.id)
            .await
            .map_err(ApiError::Internal)?;
        let applicants = with_profiles(pool, applicants).await?;

        Ok(JobDetail {
            id: job.id,
            title: job.title,
            description: job.description,
            company_name: job.company_name,
            posted_by_id: job.posted_by_id,
            posted_on: job.posted_on,
            total_applications: job.total_applications,
            posted_by: poster.into_response(poster_profile),
            applicants,
        })
    }

    /// Apply `applicant` to a job
    ///
    /// Returns the job's new application count.
    pub async fn apply(pool: &PgPool, job_id: i64, applicant: &UserRecord) -> Result<i32, ApiError> {
        let outcome = JobRepository::apply(pool, job_id, applicant.id)
            .await
            .map_err(ApiError::Internal)?;

        match outcome {
            ApplyOutcome::Applied { total_applications } => {
                info!(job_id, user_id = applicant.id, total_applications, "Applied for job");
                Ok(total_applications)
            }
            ApplyOutcome::JobNotFound => Err(ApiError::NotFound("Job not found".to_string())),
            ApplyOutcome::AlreadyApplied => {
                warn!(job_id, user_id = applicant.id, "Repeat application rejected");
                Err(ApiError::Conflict(
                    "You have already applied for this job".to_string(),
                ))
            }
        }
    }
}
