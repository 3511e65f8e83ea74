//! In-memory persistence gateway backing the service binary, the demo
//! narrative, and the test suites. One mutex guards the whole state, so
//! every gateway call is a single atomic step.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use chrono::Utc;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, CandidateId, CandidateProfile,
    CandidateProfilePatch, EmployerId, EmployerProfile, EmployerProfilePatch, Job, JobId,
};
use super::gateway::{
    ApplicationStore, GatewayError, JobStore, NewApplication, NewJob, ProfileStore,
};

#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: Mutex<GatewayState>,
}

#[derive(Debug, Default)]
struct GatewayState {
    jobs: BTreeMap<JobId, Job>,
    applications: BTreeMap<ApplicationId, Application>,
    application_pairs: HashSet<(CandidateId, JobId)>,
    candidates: BTreeMap<CandidateId, CandidateProfile>,
    employers: BTreeMap<EmployerId, EmployerProfile>,
    next_job_id: u64,
    next_application_id: u64,
}

impl GatewayState {
    fn allocate_job_id(&mut self) -> JobId {
        self.next_job_id += 1;
        JobId(format!("job-{:06}", self.next_job_id))
    }

    fn allocate_application_id(&mut self) -> ApplicationId {
        self.next_application_id += 1;
        ApplicationId(format!("app-{:06}", self.next_application_id))
    }
}

impl JobStore for InMemoryGateway {
    fn insert_job(&self, job: NewJob) -> Result<Job, GatewayError> {
        let mut state = self.state.lock().expect("gateway state mutex poisoned");
        let id = state.allocate_job_id();
        let record = Job {
            id: id.clone(),
            employer_id: job.employer_id,
            company_name: job.company_name,
            title: job.title,
            location: job.location,
            salary: job.salary,
            description: job.description,
            accessibility_tags: job.accessibility_tags,
            facets: job.facets,
            posted_at: Utc::now(),
        };
        state.jobs.insert(id, record.clone());
        Ok(record)
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<Job>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state.jobs.get(id).cloned())
    }

    fn list_jobs(&self) -> Result<Vec<Job>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state.jobs.values().cloned().collect())
    }

    fn jobs_by_employer(&self, employer: &EmployerId) -> Result<Vec<Job>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state
            .jobs
            .values()
            .filter(|job| &job.employer_id == employer)
            .cloned()
            .collect())
    }
}

impl ApplicationStore for InMemoryGateway {
    fn insert_application(&self, application: NewApplication) -> Result<Application, GatewayError> {
        let mut state = self.state.lock().expect("gateway state mutex poisoned");
        let pair = (
            application.candidate_id.clone(),
            application.job_id.clone(),
        );
        if state.application_pairs.contains(&pair) {
            return Err(GatewayError::Conflict);
        }
        let id = state.allocate_application_id();
        let record = Application {
            id: id.clone(),
            job_id: application.job_id,
            candidate_id: application.candidate_id,
            job_title: application.job_title,
            company_name: application.company_name,
            status: application.status,
            applied_at: Utc::now(),
            version: 1,
        };
        state.application_pairs.insert(pair);
        state.applications.insert(id, record.clone());
        Ok(record)
    }

    fn fetch_application(&self, id: &ApplicationId) -> Result<Option<Application>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state.applications.get(id).cloned())
    }

    fn find_for_pair(
        &self,
        candidate: &CandidateId,
        job: &JobId,
    ) -> Result<Option<Application>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state
            .applications
            .values()
            .find(|application| {
                &application.candidate_id == candidate && &application.job_id == job
            })
            .cloned())
    }

    fn applications_for_candidate(
        &self,
        candidate: &CandidateId,
    ) -> Result<Vec<Application>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state
            .applications
            .values()
            .filter(|application| &application.candidate_id == candidate)
            .cloned()
            .collect())
    }

    fn applications_for_job(&self, job: &JobId) -> Result<Vec<Application>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state
            .applications
            .values()
            .filter(|application| &application.job_id == job)
            .cloned()
            .collect())
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        expected_version: u64,
    ) -> Result<Application, GatewayError> {
        let mut state = self.state.lock().expect("gateway state mutex poisoned");
        let application = state
            .applications
            .get_mut(id)
            .ok_or(GatewayError::NotFound)?;
        if application.version != expected_version {
            return Err(GatewayError::Conflict);
        }
        application.status = status;
        application.version += 1;
        Ok(application.clone())
    }
}

impl ProfileStore for InMemoryGateway {
    fn upsert_candidate(
        &self,
        id: &CandidateId,
        patch: CandidateProfilePatch,
    ) -> Result<CandidateProfile, GatewayError> {
        let mut state = self.state.lock().expect("gateway state mutex poisoned");
        let profile = state
            .candidates
            .entry(id.clone())
            .or_insert_with(|| CandidateProfile::new(id.clone(), Utc::now()));
        profile.merge(patch);
        Ok(profile.clone())
    }

    fn fetch_candidate(&self, id: &CandidateId) -> Result<Option<CandidateProfile>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state.candidates.get(id).cloned())
    }

    fn upsert_employer(
        &self,
        id: &EmployerId,
        patch: EmployerProfilePatch,
    ) -> Result<EmployerProfile, GatewayError> {
        let mut state = self.state.lock().expect("gateway state mutex poisoned");
        let profile = state
            .employers
            .entry(id.clone())
            .or_insert_with(|| EmployerProfile::new(id.clone(), Utc::now()));
        profile.merge(patch);
        Ok(profile.clone())
    }

    fn fetch_employer(&self, id: &EmployerId) -> Result<Option<EmployerProfile>, GatewayError> {
        let state = self.state.lock().expect("gateway state mutex poisoned");
        Ok(state.employers.get(id).cloned())
    }
}
