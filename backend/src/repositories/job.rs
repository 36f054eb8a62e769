//! Job repository: postings, applications and the apply transaction

use super::user::{into_records, UserRecord, UserRow};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use job_board_shared::types::{JobSummary, UserSummary};
use sqlx::PgPool;

const JOB_COLUMNS: &str =
    "id, title, description, company_name, posted_on, total_applications, posted_by_id";

/// Job record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
    pub total_applications: i32,
    pub posted_by_id: i64,
}

/// Job joined with the poster's public fields
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobWithPosterRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
    pub total_applications: i32,
    pub posted_by_id: i64,
    pub poster_name: String,
    pub poster_email: String,
}

impl From<JobWithPosterRecord> for JobSummary {
    fn from(record: JobWithPosterRecord) -> Self {
        JobSummary {
            id: record.id,
            title: record.title,
            description: record.description,
            company_name: record.company_name,
            posted_by_id: record.posted_by_id,
            posted_on: record.posted_on,
            total_applications: record.total_applications,
            posted_by: UserSummary {
                id: record.posted_by_id,
                name: record.poster_name,
                email: record.poster_email,
            },
        }
    }
}

/// Input for creating a job
#[derive(Debug, Clone)]
pub struct CreateJob {
    pub posted_by_id: i64,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
}

/// Result of an apply attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Association created and counter incremented together
    Applied { total_applications: i32 },
    /// No live job with that ID; nothing was written
    JobNotFound,
    /// The applicant already applied; the transaction was rolled back
    AlreadyApplied,
}

/// Job repository for database operations
pub struct JobRepository;

impl JobRepository {
    /// Create a new job with zero applications
    pub async fn create(pool: &PgPool, input: CreateJob) -> Result<JobRecord> {
        let record = sqlx::query_as::<_, JobRecord>(&format!(
            r#"
            INSERT INTO jobs (title, description, company_name, posted_on, total_applications, posted_by_id)
            VALUES ($1, $2, $3, $4, 0, $5)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.company_name)
        .bind(input.posted_on)
        .bind(input.posted_by_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List all live jobs with their posters, newest first
    pub async fn list_with_posters(pool: &PgPool) -> Result<Vec<JobWithPosterRecord>> {
        let records = sqlx::query_as::<_, JobWithPosterRecord>(
            r#"
            SELECT j.id, j.title, j.description, j.company_name, j.posted_on,
                   j.total_applications, j.posted_by_id,
                   u.name AS poster_name, u.email AS poster_email
            FROM jobs j
            JOIN users u ON u.id = j.posted_by_id
            WHERE j.deleted_at IS NULL
            ORDER BY j.posted_on DESC, j.id DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .context("failed to list jobs")?;

        Ok(records)
    }

    /// Find a live job by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<JobRecord>> {
        let record = sqlx::query_as::<_, JobRecord>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Users who applied to a job, in application order
    pub async fn applicants(pool: &PgPool, job_id: i64) -> Result<Vec<UserRecord>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.name, u.email, u.address, u.user_type, u.password_hash,
                   u.profile_headline, u.created_at, u.updated_at
            FROM job_applications ja
            JOIN users u ON u.id = ja.user_id
            WHERE ja.job_id = $1
            ORDER BY ja.applied_at, u.id
            "#,
        )
        .bind(job_id)
        .fetch_all(pool)
        .await?;

        into_records(rows)
    }

    /// Record an application and bump the job's counter in one transaction.
    ///
    /// The counter is incremented server-side first, which row-locks the job
    /// and serializes concurrent applies to it. The association insert comes
    /// second; the `(job_id, user_id)` key turns a repeat into zero inserted
    /// rows, and the transaction is rolled back so the increment is undone.
    /// Any error drops `tx` uncommitted, which rolls it back as well.
    pub async fn apply(pool: &PgPool, job_id: i64, user_id: i64) -> Result<ApplyOutcome> {
        let mut tx = pool.begin().await?;

        let total = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE jobs
            SET total_applications = total_applications + 1, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING total_applications
            "#,
        )
        .bind(job_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(total_applications) = total else {
            tx.rollback().await?;
            return Ok(ApplyOutcome::JobNotFound);
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO job_applications (job_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (job_id, user_id) DO NOTHING
            "#,
        )
        .bind(job_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            tx.rollback().await?;
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        tx.commit().await?;

        Ok(ApplyOutcome::Applied { total_applications })
    }

    /// Number of association rows for a job
    pub async fn count_applications(pool: &PgPool, job_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM job_applications WHERE job_id = $1",
        )
        .bind(job_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
