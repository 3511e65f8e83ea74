//! Persistence gateway contract.
//!
//! The marketplace components never talk to a datastore directly; they hold
//! one of these traits behind an `Arc` and rely on the implementation to
//! keep each call atomic. Gateways must bound every call with a deadline and
//! surface an exhausted deadline as [`GatewayError::Unavailable`] rather
//! than blocking, and a failed call must leave no partial write behind.

use super::domain::{
    AccessibilityFacets, Application, ApplicationId, ApplicationStatus, CandidateId,
    CandidateProfile, CandidateProfilePatch, EmployerId, EmployerProfile, EmployerProfilePatch,
    Job, JobId,
};

#[derive(Clone, Debug)]
pub struct NewJob {
    pub employer_id: EmployerId,
    pub company_name: String,
    pub title: String,
    pub location: String,
    pub salary: Option<String>,
    pub description: String,
    pub accessibility_tags: Vec<String>,
    pub facets: AccessibilityFacets,
}

#[derive(Clone, Debug)]
pub struct NewApplication {
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub job_title: String,
    pub company_name: String,
    pub status: ApplicationStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

pub trait JobStore: Send + Sync {
    /// Persist a new listing, assigning its identifier and posting time.
    fn insert_job(&self, job: NewJob) -> Result<Job, GatewayError>;

    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, GatewayError>;

    /// Every listing in posting order, oldest first.
    fn list_jobs(&self) -> Result<Vec<Job>, GatewayError>;

    fn jobs_by_employer(&self, employer: &EmployerId) -> Result<Vec<Job>, GatewayError>;
}

pub trait ApplicationStore: Send + Sync {
    /// Persist a new application, assigning its identifier, submission time,
    /// and initial record version. The insert and the duplicate check for
    /// the `(candidate, job)` pair happen as one atomic step; a pair that
    /// already holds an application yields [`GatewayError::Conflict`].
    fn insert_application(&self, application: NewApplication) -> Result<Application, GatewayError>;

    fn fetch_application(&self, id: &ApplicationId) -> Result<Option<Application>, GatewayError>;

    fn find_for_pair(
        &self,
        candidate: &CandidateId,
        job: &JobId,
    ) -> Result<Option<Application>, GatewayError>;

    fn applications_for_candidate(
        &self,
        candidate: &CandidateId,
    ) -> Result<Vec<Application>, GatewayError>;

    fn applications_for_job(&self, job: &JobId) -> Result<Vec<Application>, GatewayError>;

    /// Compare-and-set status update. The write succeeds only when the
    /// stored record still carries `expected_version`; a stale version
    /// yields [`GatewayError::Conflict`] and writes nothing.
    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        expected_version: u64,
    ) -> Result<Application, GatewayError>;
}

pub trait ProfileStore: Send + Sync {
    /// Merge write: create the profile on first sight, then fold the patch
    /// into whatever is already stored.
    fn upsert_candidate(
        &self,
        id: &CandidateId,
        patch: CandidateProfilePatch,
    ) -> Result<CandidateProfile, GatewayError>;

    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<CandidateProfile>, GatewayError>;

    fn upsert_employer(
        &self,
        id: &EmployerId,
        patch: EmployerProfilePatch,
    ) -> Result<EmployerProfile, GatewayError>;

    fn fetch_employer(&self, id: &EmployerId) -> Result<Option<EmployerProfile>, GatewayError>;
}
