use std::sync::Arc;

use axum::response::Response;
use chrono::Utc;

use crate::marketplace::domain::{
    AccessibilityFacets, AccountRole, Application, ApplicationId, ApplicationStatus, CandidateId,
    CandidateProfile, CandidateProfilePatch, EmployerId, EmployerProfile, EmployerProfilePatch,
    Identity, Job, JobDraft, JobId,
};
use crate::marketplace::gateway::{
    ApplicationStore, GatewayError, JobStore, NewApplication, NewJob, ProfileStore,
};
use crate::marketplace::memory::InMemoryGateway;
use crate::marketplace::router::MarketplaceState;

pub(super) fn gateway() -> Arc<InMemoryGateway> {
    Arc::new(InMemoryGateway::default())
}

pub(super) fn draft(title: &str) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        location: "Remote".to_string(),
        salary: Some("90k".to_string()),
        description: "Build accessible interfaces.".to_string(),
        accessibility_tags: vec!["screen-reader tested".to_string()],
        facets: AccessibilityFacets::default(),
    }
}

pub(super) fn draft_with(title: &str, facets: AccessibilityFacets) -> JobDraft {
    JobDraft {
        facets,
        ..draft(title)
    }
}

pub(super) fn employer_identity(account: &str, company: &str) -> Identity {
    Identity {
        account: account.to_string(),
        role: AccountRole::Employer,
        display_name: Some(company.to_string()),
        email: Some(format!("{account}@example.com")),
    }
}

pub(super) fn candidate_identity(account: &str) -> Identity {
    Identity {
        account: account.to_string(),
        role: AccountRole::Candidate,
        display_name: Some("Alex Doe".to_string()),
        email: Some(format!("{account}@example.com")),
    }
}

/// A state with one employer ("Tech Corp"), one candidate, and one
/// published job, the smallest catalog most scenarios need.
pub(super) fn seeded_state() -> (
    Arc<MarketplaceState<InMemoryGateway>>,
    EmployerId,
    CandidateId,
    Job,
) {
    let state = Arc::new(MarketplaceState::new(gateway()));
    let employer = EmployerId("emp-1".to_string());
    let candidate = CandidateId("cand-1".to_string());
    state
        .profiles
        .on_identity_established(&employer_identity("emp-1", "Tech Corp"))
        .expect("employer identity registers");
    state
        .profiles
        .on_identity_established(&candidate_identity("cand-1"))
        .expect("candidate identity registers");
    let job = state
        .listings
        .post_job(
            &employer,
            draft_with(
                "Frontend Developer",
                AccessibilityFacets {
                    remote: true,
                    screen_reader_friendly: true,
                    ..AccessibilityFacets::default()
                },
            ),
        )
        .expect("job publishes");
    (state, employer, candidate, job)
}

pub(super) fn application(
    id: &str,
    candidate: &str,
    job: &str,
    status: ApplicationStatus,
    version: u64,
) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        job_id: JobId(job.to_string()),
        candidate_id: CandidateId(candidate.to_string()),
        job_title: "Frontend Developer".to_string(),
        company_name: "Tech Corp".to_string(),
        status,
        applied_at: Utc::now(),
        version,
    }
}

pub(super) async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn offline() -> GatewayError {
    GatewayError::Unavailable("storage offline".to_string())
}

/// Gateway double whose every call fails as an outage.
pub(super) struct UnavailableGateway;

impl JobStore for UnavailableGateway {
    fn insert_job(&self, _job: NewJob) -> Result<Job, GatewayError> {
        Err(offline())
    }

    fn fetch_job(&self, _id: &JobId) -> Result<Option<Job>, GatewayError> {
        Err(offline())
    }

    fn list_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        Err(offline())
    }

    fn jobs_by_employer(&self, _employer: &EmployerId) -> Result<Vec<Job>, GatewayError> {
        Err(offline())
    }
}

impl ApplicationStore for UnavailableGateway {
    fn insert_application(
        &self,
        _application: NewApplication,
    ) -> Result<Application, GatewayError> {
        Err(offline())
    }

    fn fetch_application(&self, _id: &ApplicationId) -> Result<Option<Application>, GatewayError> {
        Err(offline())
    }

    fn find_for_pair(
        &self,
        _candidate: &CandidateId,
        _job: &JobId,
    ) -> Result<Option<Application>, GatewayError> {
        Err(offline())
    }

    fn applications_for_candidate(
        &self,
        _candidate: &CandidateId,
    ) -> Result<Vec<Application>, GatewayError> {
        Err(offline())
    }

    fn applications_for_job(&self, _job: &JobId) -> Result<Vec<Application>, GatewayError> {
        Err(offline())
    }

    fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
        _expected_version: u64,
    ) -> Result<Application, GatewayError> {
        Err(offline())
    }
}

impl ProfileStore for UnavailableGateway {
    fn upsert_candidate(
        &self,
        _id: &CandidateId,
        _patch: CandidateProfilePatch,
    ) -> Result<CandidateProfile, GatewayError> {
        Err(offline())
    }

    fn fetch_candidate(
        &self,
        _id: &CandidateId,
    ) -> Result<Option<CandidateProfile>, GatewayError> {
        Err(offline())
    }

    fn upsert_employer(
        &self,
        _id: &EmployerId,
        _patch: EmployerProfilePatch,
    ) -> Result<EmployerProfile, GatewayError> {
        Err(offline())
    }

    fn fetch_employer(&self, _id: &EmployerId) -> Result<Option<EmployerProfile>, GatewayError> {
        Err(offline())
    }
}

/// Application store double that reports no existing application and then
/// rejects the insert, the shape of a lost submission race.
pub(super) struct ConflictingApplications;

impl ApplicationStore for ConflictingApplications {
    fn insert_application(
        &self,
        _application: NewApplication,
    ) -> Result<Application, GatewayError> {
        Err(GatewayError::Conflict)
    }

    fn fetch_application(&self, _id: &ApplicationId) -> Result<Option<Application>, GatewayError> {
        Ok(None)
    }

    fn find_for_pair(
        &self,
        _candidate: &CandidateId,
        _job: &JobId,
    ) -> Result<Option<Application>, GatewayError> {
        Ok(None)
    }

    fn applications_for_candidate(
        &self,
        _candidate: &CandidateId,
    ) -> Result<Vec<Application>, GatewayError> {
        Ok(Vec::new())
    }

    fn applications_for_job(&self, _job: &JobId) -> Result<Vec<Application>, GatewayError> {
        Ok(Vec::new())
    }

    fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
        _expected_version: u64,
    ) -> Result<Application, GatewayError> {
        Err(GatewayError::Conflict)
    }
}

/// Application store double whose stored record is always newer than the
/// version the caller read, the shape of a lost update race.
pub(super) struct ContestedApplications {
    pub(super) current: Application,
}

impl ApplicationStore for ContestedApplications {
    fn insert_application(
        &self,
        _application: NewApplication,
    ) -> Result<Application, GatewayError> {
        Err(GatewayError::Conflict)
    }

    fn fetch_application(&self, _id: &ApplicationId) -> Result<Option<Application>, GatewayError> {
        Ok(Some(self.current.clone()))
    }

    fn find_for_pair(
        &self,
        _candidate: &CandidateId,
        _job: &JobId,
    ) -> Result<Option<Application>, GatewayError> {
        Ok(Some(self.current.clone()))
    }

    fn applications_for_candidate(
        &self,
        _candidate: &CandidateId,
    ) -> Result<Vec<Application>, GatewayError> {
        Ok(vec![self.current.clone()])
    }

    fn applications_for_job(&self, _job: &JobId) -> Result<Vec<Application>, GatewayError> {
        Ok(vec![self.current.clone()])
    }

    fn update_status(
        &self,
        _id: &ApplicationId,
        _status: ApplicationStatus,
        _expected_version: u64,
    ) -> Result<Application, GatewayError> {
        Err(GatewayError::Conflict)
    }
}
