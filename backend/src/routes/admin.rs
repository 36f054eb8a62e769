//! Admin routes: posting jobs and reviewing applicants
//!
//! Every handler here takes an [`AdminUser`], so a missing or bad token is
//! rejected with 401 and a non-admin caller with 403 before the handler runs.

use super::form::FormBody;
use crate::auth::AdminUser;
use crate::error::{ApiError, ApiResult};
use crate::services::{JobService, UserService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use job_board_shared::types::{
    ApplicantResponse, ApplicantsResponse, CreateJobRequest, JobDetail, MessageResponse,
};
use job_board_shared::validation::parse_id;

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/job", post(create_job))
        .route("/job/:job_id", get(get_job))
        .route("/applicants", get(list_applicants))
        .route("/applicant/:applicant_id", get(get_applicant))
}

/// POST /admin/job
async fn create_job(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    FormBody(req): FormBody<CreateJobRequest>,
) -> ApiResult<Json<MessageResponse>> {
    JobService::create_job(state.db(), &admin, req).await?;
    Ok(Json(MessageResponse::new("Job created successfully")))
}

/// GET /admin/job/:job_id - job with full poster and applicants
async fn get_job(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(job_id): Path<String>,
) -> ApiResult<Json<JobDetail>> {
    let job_id = parse_id("job_id", &job_id).map_err(ApiError::Validation)?;
    let job = JobService::get_job(state.db(), job_id).await?;
    Ok(Json(job))
}

/// GET /admin/applicants
async fn list_applicants(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApplicantsResponse>> {
    let applicants = UserService::list_applicants(state.db()).await?;
    Ok(Json(ApplicantsResponse { applicants }))
}

/// GET /admin/applicant/:applicant_id
async fn get_applicant(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(applicant_id): Path<String>,
) -> ApiResult<Json<ApplicantResponse>> {
    let applicant_id = parse_id("applicant_id", &applicant_id).map_err(ApiError::Validation)?;
    let applicant = UserService::get_applicant(state.db(), applicant_id).await?;
    Ok(Json(ApplicantResponse { applicant }))
}
