use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use accesshire::marketplace::{
    AccessibilityFacets, AccountRole, EmployerId, Identity, InMemoryGateway, Job, JobDraft,
    MarketplaceError, MarketplaceState,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_marketplace() -> Arc<MarketplaceState<InMemoryGateway>> {
    Arc::new(MarketplaceState::new(Arc::new(InMemoryGateway::default())))
}

/// Seed the gateway with one demo employer and a small catalog covering the
/// accessibility facets the search surface filters on.
pub(crate) fn seed_sample_catalog(
    state: &MarketplaceState<InMemoryGateway>,
) -> Result<(EmployerId, Vec<Job>), MarketplaceError> {
    let employer = EmployerId("emp-demo".to_string());
    state.profiles.on_identity_established(&Identity {
        account: employer.0.clone(),
        role: AccountRole::Employer,
        display_name: Some("Tech Corp".to_string()),
        email: Some("talent@techcorp.example".to_string()),
    })?;

    let drafts = [
        JobDraft {
            title: "Frontend Developer".to_string(),
            location: "Remote".to_string(),
            salary: Some("95k".to_string()),
            description: "Ship accessible web interfaces with a keyboard-first mindset."
                .to_string(),
            accessibility_tags: vec!["keyboard navigable tooling".to_string()],
            facets: AccessibilityFacets {
                remote: true,
                screen_reader_friendly: true,
                ..AccessibilityFacets::default()
            },
        },
        JobDraft {
            title: "Customer Success Specialist".to_string(),
            location: "Des Moines, IA".to_string(),
            salary: Some("62k".to_string()),
            description: "Guide customers through onboarding at a sustainable pace.".to_string(),
            accessibility_tags: vec!["quiet workspace".to_string()],
            facets: AccessibilityFacets {
                flexible_hours: true,
                neurodiverse_inclusive: true,
                ..AccessibilityFacets::default()
            },
        },
        JobDraft {
            title: "QA Engineer".to_string(),
            location: "Hybrid".to_string(),
            salary: None,
            description: "Own assistive-technology test coverage across releases.".to_string(),
            accessibility_tags: vec!["screen-reader test rigs".to_string()],
            facets: AccessibilityFacets {
                remote: true,
                flexible_hours: true,
                ..AccessibilityFacets::default()
            },
        },
    ];

    let mut jobs = Vec::with_capacity(drafts.len());
    for draft in drafts {
        jobs.push(state.listings.post_job(&employer, draft)?);
    }
    Ok((employer, jobs))
}
