//! Job catalog index: candidate-facing search over published listings.

use std::sync::Arc;

use super::domain::{AccessibilityFacets, EmployerId, Job, JobId};
use super::gateway::JobStore;
use super::MarketplaceError;

/// A catalog search request. An absent or blank `text` matches every
/// listing; facet flags narrow the result to jobs that affirmatively
/// declare the accommodation.
#[derive(Clone, Debug, Default)]
pub struct JobQuery {
    pub text: Option<String>,
    pub facets: FacetFilter,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FacetFilter {
    pub remote: bool,
    pub screen_reader: bool,
    pub flexible_hours: bool,
    pub neurodiverse: bool,
}

impl FacetFilter {
    /// Whether a listing's declared facets satisfy every requested flag.
    /// Unrequested flags place no constraint.
    pub fn admits(self, facets: AccessibilityFacets) -> bool {
        (!self.remote || facets.remote)
            && (!self.screen_reader || facets.screen_reader_friendly)
            && (!self.flexible_hours || facets.flexible_hours)
            && (!self.neurodiverse || facets.neurodiverse_inclusive)
    }
}

pub struct JobCatalog<J> {
    jobs: Arc<J>,
}

impl<J> JobCatalog<J>
where
    J: JobStore,
{
    pub fn new(jobs: Arc<J>) -> Self {
        Self { jobs }
    }

    /// Every published listing in posting order.
    pub fn list_all(&self) -> Result<Vec<Job>, MarketplaceError> {
        Ok(self.jobs.list_jobs()?)
    }

    /// Listings owned by one employer. Zero matches is an empty vector,
    /// never an error.
    pub fn list_by_employer(&self, employer: &EmployerId) -> Result<Vec<Job>, MarketplaceError> {
        Ok(self.jobs.jobs_by_employer(employer)?)
    }

    /// Case-insensitive substring search over title and company name,
    /// intersected with the facet filter. No matches is an empty result,
    /// never an error.
    pub fn search(&self, query: &JobQuery) -> Result<Vec<Job>, MarketplaceError> {
        let needle = query
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase);
        let jobs = self.jobs.list_jobs()?;
        Ok(jobs
            .into_iter()
            .filter(|job| match &needle {
                Some(needle) => {
                    job.title.to_lowercase().contains(needle)
                        || job.company_name.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|job| query.facets.admits(job.facets))
            .collect())
    }

    pub fn fetch(&self, id: &JobId) -> Result<Job, MarketplaceError> {
        self.jobs
            .fetch_job(id)?
            .ok_or_else(|| MarketplaceError::JobNotFound(id.clone()))
    }
}
