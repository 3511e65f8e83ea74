use accesshire::error::AppError;
use accesshire::marketplace::{
    AccountRole, ApplicationStatus, CandidateId, FacetFilter, Identity, JobQuery,
};
use clap::Args;

use crate::infra::{build_marketplace, seed_sample_catalog};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the employer review portion of the demo.
    #[arg(long)]
    pub(crate) skip_review: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { skip_review } = args;

    println!("AccessHire marketplace demo");
    let state = build_marketplace();
    let (employer, jobs) = seed_sample_catalog(&state)?;
    println!("Seeded {} listings for employer {}", jobs.len(), employer);

    let candidate = CandidateId("cand-demo".to_string());
    state.profiles.on_identity_established(&Identity {
        account: candidate.0.clone(),
        role: AccountRole::Candidate,
        display_name: Some("Alex Doe".to_string()),
        email: Some("alex@example.com".to_string()),
    })?;
    println!("Registered candidate {candidate}");

    println!("\nSearching remote listings matching 'frontend'");
    let query = JobQuery {
        text: Some("frontend".to_string()),
        facets: FacetFilter {
            remote: true,
            ..FacetFilter::default()
        },
    };
    let hits = state.catalog.search(&query)?;
    for job in &hits {
        println!("- {} at {} ({})", job.title, job.company_name, job.location);
    }
    let Some(job) = hits.first() else {
        println!("No matching listings; nothing left to demonstrate");
        return Ok(());
    };

    println!("\nApplying to {}", job.title);
    let application = state.lifecycle.apply(&candidate, &job.id)?;
    println!(
        "- Application {} accepted with status {}",
        application.id, application.status
    );
    match state.lifecycle.apply(&candidate, &job.id) {
        Ok(_) => println!("- Unexpected duplicate acceptance"),
        Err(err) => println!("- Second attempt rejected: {err}"),
    }

    if !skip_review {
        println!("\nEmployer review");
        for stage in [ApplicationStatus::UnderReview, ApplicationStatus::Interview] {
            let updated = state.lifecycle.transition(&application.id, stage)?;
            println!("- Moved to {} (version {})", updated.status, updated.version);
        }
        match state
            .lifecycle
            .transition(&application.id, ApplicationStatus::UnderReview)
        {
            Ok(_) => println!("- Unexpected backward move"),
            Err(err) => println!("- Backward move rejected: {err}"),
        }
    }

    if let Some(next_job) = jobs.get(1) {
        println!("\nCandidate housekeeping");
        let spare = state.lifecycle.apply(&candidate, &next_job.id)?;
        let withdrawn = state.lifecycle.withdraw(&candidate, &spare.id)?;
        println!(
            "- Withdrew application {} for {}",
            withdrawn.id, withdrawn.job_title
        );
    }

    let stats = state.listings.dashboard_stats(&employer)?;
    println!(
        "\nEmployer dashboard: {} active listings, {} applications",
        stats.active_job_count, stats.total_applications
    );
    let summary = state.lifecycle.candidate_summary(&candidate)?;
    println!(
        "Candidate summary: {} total, {} interviewing",
        summary.total_applications, summary.interviews
    );

    match serde_json::to_string_pretty(&state.lifecycle.list_for_candidate(&candidate)?) {
        Ok(json) => println!("\nCandidate applications payload:\n{json}"),
        Err(err) => println!("\nCandidate applications payload unavailable: {err}"),
    }

    Ok(())
}
