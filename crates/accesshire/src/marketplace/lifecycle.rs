//! Application lifecycle manager: submission, review transitions, and
//! candidate-side views of the pipeline.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{Application, ApplicationId, ApplicationStatus, CandidateId, JobId};
use super::gateway::{ApplicationStore, GatewayError, JobStore, NewApplication, ProfileStore};
use super::MarketplaceError;

/// Counts shown on the candidate dashboard.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub total_applications: usize,
    pub in_review: usize,
    pub interviews: usize,
    pub selected: usize,
}

pub struct ApplicationWorkflow<S, J, P> {
    applications: Arc<S>,
    jobs: Arc<J>,
    profiles: Arc<P>,
}

impl<S, J, P> ApplicationWorkflow<S, J, P>
where
    S: ApplicationStore,
    J: JobStore,
    P: ProfileStore,
{
    pub fn new(applications: Arc<S>, jobs: Arc<J>, profiles: Arc<P>) -> Self {
        Self {
            applications,
            jobs,
            profiles,
        }
    }

    /// Submit an application for a published job. The stored record carries
    /// a snapshot of the job title and company name so candidate views
    /// survive later listing edits. At most one application may exist per
    /// `(candidate, job)` pair; the gateway enforces the constraint
    /// atomically, so concurrent submissions admit exactly one winner.
    pub fn apply(
        &self,
        candidate: &CandidateId,
        job_id: &JobId,
    ) -> Result<Application, MarketplaceError> {
        let job = self
            .jobs
            .fetch_job(job_id)?
            .ok_or_else(|| MarketplaceError::JobNotFound(job_id.clone()))?;
        if self.profiles.fetch_candidate(candidate)?.is_none() {
            return Err(MarketplaceError::Unauthenticated);
        }
        if self.applications.find_for_pair(candidate, job_id)?.is_some() {
            return Err(MarketplaceError::AlreadyApplied {
                candidate: candidate.clone(),
                job: job_id.clone(),
            });
        }
        let stored = self
            .applications
            .insert_application(NewApplication {
                job_id: job.id.clone(),
                candidate_id: candidate.clone(),
                job_title: job.title.clone(),
                company_name: job.company_name.clone(),
                status: ApplicationStatus::Applied,
            })
            .map_err(|error| match error {
                GatewayError::Conflict => MarketplaceError::AlreadyApplied {
                    candidate: candidate.clone(),
                    job: job_id.clone(),
                },
                other => MarketplaceError::Gateway(other),
            })?;
        info!(
            application = %stored.id,
            candidate = %stored.candidate_id,
            job = %stored.job_id,
            "application submitted"
        );
        Ok(stored)
    }

    /// Advance an application to `next`. The review pipeline only moves
    /// forward; skipping stages is allowed, revisiting them is not, and a
    /// terminal record is frozen. The write is a compare-and-set against
    /// the version read here, so two racing updates admit one winner.
    pub fn transition(
        &self,
        id: &ApplicationId,
        next: ApplicationStatus,
    ) -> Result<Application, MarketplaceError> {
        let current = self
            .applications
            .fetch_application(id)?
            .ok_or_else(|| MarketplaceError::ApplicationNotFound(id.clone()))?;
        if !current.status.can_transition_to(next) {
            return Err(MarketplaceError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }
        let updated = self
            .applications
            .update_status(id, next, current.version)?;
        info!(
            application = %updated.id,
            from = current.status.label(),
            to = updated.status.label(),
            "application status advanced"
        );
        Ok(updated)
    }

    /// Candidate-initiated withdrawal. Only the owner may withdraw, and
    /// only while the application is not already terminal.
    pub fn withdraw(
        &self,
        candidate: &CandidateId,
        id: &ApplicationId,
    ) -> Result<Application, MarketplaceError> {
        let current = self
            .applications
            .fetch_application(id)?
            .ok_or_else(|| MarketplaceError::ApplicationNotFound(id.clone()))?;
        if current.candidate_id != *candidate {
            return Err(MarketplaceError::InvalidArgument(
                "application belongs to a different candidate".to_string(),
            ));
        }
        if !current.status.can_transition_to(ApplicationStatus::Withdrawn) {
            return Err(MarketplaceError::InvalidTransition {
                from: current.status,
                to: ApplicationStatus::Withdrawn,
            });
        }
        let updated =
            self.applications
                .update_status(id, ApplicationStatus::Withdrawn, current.version)?;
        info!(
            application = %updated.id,
            candidate = %updated.candidate_id,
            "application withdrawn"
        );
        Ok(updated)
    }

    pub fn list_for_candidate(
        &self,
        candidate: &CandidateId,
    ) -> Result<Vec<Application>, MarketplaceError> {
        Ok(self.applications.applications_for_candidate(candidate)?)
    }

    pub fn list_for_job(&self, job: &JobId) -> Result<Vec<Application>, MarketplaceError> {
        Ok(self.applications.applications_for_job(job)?)
    }

    pub fn candidate_summary(
        &self,
        candidate: &CandidateId,
    ) -> Result<CandidateSummary, MarketplaceError> {
        let applications = self.applications.applications_for_candidate(candidate)?;
        let mut summary = CandidateSummary {
            total_applications: applications.len(),
            ..CandidateSummary::default()
        };
        for application in &applications {
            match application.status {
                ApplicationStatus::UnderReview => summary.in_review += 1,
                ApplicationStatus::Interview => summary.interviews += 1,
                ApplicationStatus::Selected => summary.selected += 1,
                _ => {}
            }
        }
        Ok(summary)
    }
}
