//! Public job listing and the apply endpoint

use crate::auth::ApplicantUser;
use crate::error::{ApiError, ApiResult};
use crate::services::JobService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use job_board_shared::types::{ApplyJobQuery, JobsResponse, MessageResponse};
use job_board_shared::validation::parse_id;

/// Create job routes
pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/apply", get(apply))
}

/// GET /jobs - all jobs, no authentication
async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<JobsResponse>> {
    let jobs = JobService::list_jobs(state.db()).await?;
    Ok(Json(JobsResponse { jobs }))
}

/// GET /jobs/apply?job_id=N - apply the caller to a job
async fn apply(
    State(state): State<AppState>,
    ApplicantUser(user): ApplicantUser,
    Query(query): Query<ApplyJobQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let job_id = parse_id("job_id", query.job_id.as_deref().unwrap_or_default())
        .map_err(ApiError::Validation)?;

    JobService::apply(state.db(), job_id, &user).await?;
    Ok(Json(MessageResponse::new("Applied for job successfully")))
}
