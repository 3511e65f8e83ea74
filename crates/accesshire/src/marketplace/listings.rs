//! Employer listing aggregator: job publication and dashboard figures.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::domain::{EmployerId, Job, JobDraft};
use super::gateway::{ApplicationStore, JobStore, NewJob, ProfileStore};
use super::MarketplaceError;

/// Figures shown on the employer dashboard, recomputed from live records
/// on every read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DashboardStats {
    pub active_job_count: usize,
    pub total_applications: usize,
}

pub struct ListingDesk<J, S, P> {
    jobs: Arc<J>,
    applications: Arc<S>,
    profiles: Arc<P>,
}

impl<J, S, P> ListingDesk<J, S, P>
where
    J: JobStore,
    S: ApplicationStore,
    P: ProfileStore,
{
    pub fn new(jobs: Arc<J>, applications: Arc<S>, profiles: Arc<P>) -> Self {
        Self {
            jobs,
            applications,
            profiles,
        }
    }

    /// Publish a listing under the employer's registered company name. The
    /// accessibility facets come from the draft exactly as declared; the
    /// desk never infers them.
    pub fn post_job(&self, employer: &EmployerId, draft: JobDraft) -> Result<Job, MarketplaceError> {
        if draft.title.trim().is_empty() {
            return Err(MarketplaceError::InvalidArgument(
                "job title must not be empty".to_string(),
            ));
        }
        let profile = self
            .profiles
            .fetch_employer(employer)?
            .ok_or(MarketplaceError::Unauthenticated)?;
        let company_name = profile.company_name.ok_or_else(|| {
            MarketplaceError::InvalidArgument(
                "employer profile has no company name yet".to_string(),
            )
        })?;
        let job = self.jobs.insert_job(NewJob {
            employer_id: employer.clone(),
            company_name,
            title: draft.title,
            location: draft.location,
            salary: draft.salary,
            description: draft.description,
            accessibility_tags: draft.accessibility_tags,
            facets: draft.facets,
        })?;
        info!(job = %job.id, employer = %job.employer_id, "job posted");
        Ok(job)
    }

    pub fn dashboard_stats(&self, employer: &EmployerId) -> Result<DashboardStats, MarketplaceError> {
        let jobs = self.jobs.jobs_by_employer(employer)?;
        let mut stats = DashboardStats {
            active_job_count: jobs.len(),
            total_applications: 0,
        };
        for job in &jobs {
            stats.total_applications += self.applications.applications_for_job(&job.id)?.len();
        }
        Ok(stats)
    }
}
