//! HTTP surface for the marketplace engine.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::catalog::{FacetFilter, JobCatalog, JobQuery};
use super::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateId, CandidateProfile,
    CandidateProfilePatch, EmployerId, EmployerProfile, EmployerProfilePatch, Identity, Job,
    JobDraft, JobId,
};
use super::gateway::{ApplicationStore, GatewayError, JobStore, ProfileStore};
use super::lifecycle::{ApplicationWorkflow, CandidateSummary};
use super::listings::{DashboardStats, ListingDesk};
use super::profiles::ProfileSynchronizer;
use super::MarketplaceError;

/// Shared handler state: the four marketplace components wired to one
/// persistence gateway.
pub struct MarketplaceState<G> {
    pub catalog: JobCatalog<G>,
    pub lifecycle: ApplicationWorkflow<G, G, G>,
    pub profiles: ProfileSynchronizer<G>,
    pub listings: ListingDesk<G, G, G>,
}

impl<G> MarketplaceState<G>
where
    G: JobStore + ApplicationStore + ProfileStore,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            catalog: JobCatalog::new(gateway.clone()),
            lifecycle: ApplicationWorkflow::new(gateway.clone(), gateway.clone(), gateway.clone()),
            profiles: ProfileSynchronizer::new(gateway.clone()),
            listings: ListingDesk::new(gateway.clone(), gateway.clone(), gateway),
        }
    }
}

pub fn marketplace_router<G>(state: Arc<MarketplaceState<G>>) -> Router
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Router::new()
        .route("/api/v1/jobs", get(search_jobs).post(publish_job))
        .route("/api/v1/jobs/:job_id", get(fetch_job))
        .route("/api/v1/jobs/:job_id/applications", get(job_applications))
        .route("/api/v1/applications", post(submit_application))
        .route(
            "/api/v1/applications/:application_id/status",
            post(advance_application),
        )
        .route(
            "/api/v1/applications/:application_id/withdraw",
            post(withdraw_application),
        )
        .route(
            "/api/v1/candidates/:candidate_id/applications",
            get(candidate_applications),
        )
        .route(
            "/api/v1/candidates/:candidate_id/summary",
            get(candidate_summary),
        )
        .route(
            "/api/v1/candidates/:candidate_id/profile",
            get(candidate_profile).put(update_candidate_profile),
        )
        .route(
            "/api/v1/employers/:employer_id/profile",
            get(employer_profile).put(update_employer_profile),
        )
        .route("/api/v1/employers/:employer_id/jobs", get(employer_jobs))
        .route(
            "/api/v1/employers/:employer_id/dashboard",
            get(employer_dashboard),
        )
        .route("/api/v1/identities", post(identity_established))
        .with_state(state)
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::JobNotFound(_)
            | Self::ApplicationNotFound(_)
            | Self::ProfileNotFound(_)
            | Self::Gateway(GatewayError::NotFound) => StatusCode::NOT_FOUND,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::AlreadyApplied { .. } | Self::Gateway(GatewayError::Conflict) => {
                StatusCode::CONFLICT
            }
            Self::InvalidTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Gateway(GatewayError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    text: Option<String>,
    #[serde(default)]
    remote: bool,
    #[serde(default)]
    screen_reader: bool,
    #[serde(default)]
    flexible_hours: bool,
    #[serde(default)]
    neurodiverse: bool,
}

#[derive(Debug, Deserialize)]
struct PublishJobRequest {
    employer_id: EmployerId,
    #[serde(flatten)]
    draft: JobDraft,
}

#[derive(Debug, Deserialize)]
struct SubmitApplicationRequest {
    candidate_id: CandidateId,
    job_id: JobId,
}

#[derive(Debug, Deserialize)]
struct AdvanceApplicationRequest {
    status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
struct WithdrawApplicationRequest {
    candidate_id: CandidateId,
}

async fn search_jobs<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Job>>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    let query = JobQuery {
        text: params.text,
        facets: FacetFilter {
            remote: params.remote,
            screen_reader: params.screen_reader,
            flexible_hours: params.flexible_hours,
            neurodiverse: params.neurodiverse,
        },
    };
    Ok(Json(state.catalog.search(&query)?))
}

async fn fetch_job<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(job_id): Path<JobId>,
) -> Result<Json<Job>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.catalog.fetch(&job_id)?))
}

async fn publish_job<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Json(request): Json<PublishJobRequest>,
) -> Result<(StatusCode, Json<Job>), MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    let job = state.listings.post_job(&request.employer_id, request.draft)?;
    Ok((StatusCode::CREATED, Json(job)))
}

async fn job_applications<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(job_id): Path<JobId>,
) -> Result<Json<Vec<Application>>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.lifecycle.list_for_job(&job_id)?))
}

async fn submit_application<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    let application = state
        .lifecycle
        .apply(&request.candidate_id, &request.job_id)?;
    Ok((StatusCode::CREATED, Json(application)))
}

async fn advance_application<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(application_id): Path<ApplicationId>,
    Json(request): Json<AdvanceApplicationRequest>,
) -> Result<Json<Application>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(
        state.lifecycle.transition(&application_id, request.status)?,
    ))
}

async fn withdraw_application<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(application_id): Path<ApplicationId>,
    Json(request): Json<WithdrawApplicationRequest>,
) -> Result<Json<Application>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(
        state
            .lifecycle
            .withdraw(&request.candidate_id, &application_id)?,
    ))
}

async fn candidate_applications<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(candidate_id): Path<CandidateId>,
) -> Result<Json<Vec<Application>>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.lifecycle.list_for_candidate(&candidate_id)?))
}

async fn candidate_summary<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(candidate_id): Path<CandidateId>,
) -> Result<Json<CandidateSummary>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.lifecycle.candidate_summary(&candidate_id)?))
}

async fn candidate_profile<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(candidate_id): Path<CandidateId>,
) -> Result<Json<CandidateProfile>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.profiles.candidate(&candidate_id)?))
}

async fn update_candidate_profile<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(candidate_id): Path<CandidateId>,
    Json(patch): Json<CandidateProfilePatch>,
) -> Result<Json<CandidateProfile>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.profiles.update_candidate(&candidate_id, patch)?))
}

async fn employer_profile<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(employer_id): Path<EmployerId>,
) -> Result<Json<EmployerProfile>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.profiles.employer(&employer_id)?))
}

async fn update_employer_profile<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(employer_id): Path<EmployerId>,
    Json(patch): Json<EmployerProfilePatch>,
) -> Result<Json<EmployerProfile>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.profiles.update_employer(&employer_id, patch)?))
}

async fn employer_jobs<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(employer_id): Path<EmployerId>,
) -> Result<Json<Vec<Job>>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.catalog.list_by_employer(&employer_id)?))
}

async fn employer_dashboard<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Path(employer_id): Path<EmployerId>,
) -> Result<Json<DashboardStats>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    Ok(Json(state.listings.dashboard_stats(&employer_id)?))
}

async fn identity_established<G>(
    State(state): State<Arc<MarketplaceState<G>>>,
    Json(identity): Json<Identity>,
) -> Result<Json<serde_json::Value>, MarketplaceError>
where
    G: JobStore + ApplicationStore + ProfileStore + 'static,
{
    state.profiles.on_identity_established(&identity)?;
    Ok(Json(json!({ "status": "ok" })))
}
