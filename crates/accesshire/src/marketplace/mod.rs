//! Job matching and application lifecycle engine.
//!
//! Four components cooperate over the persistence gateway contract defined
//! in [`gateway`]: the [`catalog::JobCatalog`] answers search and filter
//! queries, the [`lifecycle::ApplicationWorkflow`] creates applications and
//! walks them through the review status machine, the
//! [`profiles::ProfileSynchronizer`] keeps candidate and employer records in
//! step with authentication events, and the [`listings::ListingDesk`]
//! publishes jobs and derives employer dashboard figures. [`memory`] ships
//! the in-memory gateway used by the service binary, the demo, and tests.

pub mod catalog;
pub mod domain;
pub mod gateway;
pub mod lifecycle;
pub mod listings;
pub mod memory;
pub mod profiles;
pub mod router;

#[cfg(test)]
mod tests;

pub use catalog::{FacetFilter, JobCatalog, JobQuery};
pub use domain::{
    AccessibilityFacets, AccountRole, Application, ApplicationId, ApplicationStatus, CandidateId,
    CandidateProfile, CandidateProfilePatch, EmployerId, EmployerProfile, EmployerProfilePatch,
    Identity, Job, JobDraft, JobId,
};
pub use gateway::{ApplicationStore, GatewayError, JobStore, NewApplication, NewJob, ProfileStore};
pub use lifecycle::{ApplicationWorkflow, CandidateSummary};
pub use listings::{DashboardStats, ListingDesk};
pub use memory::InMemoryGateway;
pub use profiles::ProfileSynchronizer;
pub use router::{marketplace_router, MarketplaceState};

/// Error taxonomy shared by every public marketplace operation.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("application {0} not found")]
    ApplicationNotFound(ApplicationId),
    #[error("profile {0} not found")]
    ProfileNotFound(String),
    #[error("no signed-in profile for this identity")]
    Unauthenticated,
    #[error("candidate {candidate} already applied to job {job}")]
    AlreadyApplied { candidate: CandidateId, job: JobId },
    #[error("cannot move application from {from} to {to}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
