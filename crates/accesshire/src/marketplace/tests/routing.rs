use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::{draft, json_body, seeded_state, UnavailableGateway};
use crate::marketplace::domain::ApplicationStatus;
use crate::marketplace::router::{marketplace_router, MarketplaceState};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn search_endpoint_filters_by_text_and_facets() {
    let (state, employer, _, _) = seeded_state();
    state
        .listings
        .post_job(&employer, draft("Frontend Lead"))
        .expect("second job publishes");
    let router = marketplace_router(state);

    let response = router
        .oneshot(get("/api/v1/jobs?text=frontend&remote=true"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let jobs = body.as_array().expect("body is an array");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["title"], "Frontend Developer");
}

#[tokio::test]
async fn publish_endpoint_returns_created() {
    let (state, _, _, _) = seeded_state();
    let router = marketplace_router(state);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/jobs",
            json!({
                "employer_id": "emp-1",
                "title": "QA Analyst",
                "location": "Hybrid",
                "description": "Keep releases accessible.",
                "facets": { "flexibleHours": true }
            }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["id"], "job-000002");
    assert_eq!(body["company_name"], "Tech Corp");
    assert_eq!(body["facets"]["flexibleHours"], true);
}

#[tokio::test]
async fn duplicate_application_maps_to_conflict() {
    let (state, _, candidate, job) = seeded_state();
    let router = marketplace_router(state);
    let payload = json!({ "candidate_id": candidate.0, "job_id": job.id.0 });

    let first = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/applications", payload.clone()))
        .await
        .expect("router responds");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .oneshot(json_request("POST", "/api/v1/applications", payload))
        .await
        .expect("router responds");
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = json_body(second).await;
    assert!(
        body["error"]
            .as_str()
            .expect("error message is a string")
            .contains("already applied")
    );
}

#[tokio::test]
async fn backward_transition_maps_to_unprocessable() {
    let (state, _, candidate, job) = seeded_state();
    let submitted = state
        .lifecycle
        .apply(&candidate, &job.id)
        .expect("application is accepted");
    let router = marketplace_router(state);
    let uri = format!("/api/v1/applications/{}/status", submitted.id);

    let advanced = router
        .clone()
        .oneshot(json_request("POST", &uri, json!({ "status": "Interview" })))
        .await
        .expect("router responds");
    assert_eq!(advanced.status(), StatusCode::OK);

    let backward = router
        .oneshot(json_request("POST", &uri, json!({ "status": "UnderReview" })))
        .await
        .expect("router responds");
    assert_eq!(backward.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn withdraw_endpoint_retires_the_application() {
    let (state, _, candidate, job) = seeded_state();
    let submitted = state
        .lifecycle
        .apply(&candidate, &job.id)
        .expect("application is accepted");
    let router = marketplace_router(state);

    let response = router
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/applications/{}/withdraw", submitted.id),
            json!({ "candidate_id": candidate.0 }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "Withdrawn");
    assert_eq!(body["version"], 2);
}

#[tokio::test]
async fn summary_endpoint_reports_pipeline_counts() {
    let (state, _, candidate, job) = seeded_state();
    let submitted = state
        .lifecycle
        .apply(&candidate, &job.id)
        .expect("application is accepted");
    state
        .lifecycle
        .transition(&submitted.id, ApplicationStatus::UnderReview)
        .expect("review starts");
    let router = marketplace_router(state);

    let response = router
        .oneshot(get("/api/v1/candidates/cand-1/summary"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total_applications"], 1);
    assert_eq!(body["in_review"], 1);
    assert_eq!(body["selected"], 0);
}

#[tokio::test]
async fn missing_job_maps_to_not_found() {
    let (state, _, _, _) = seeded_state();
    let router = marketplace_router(state);

    let response = router
        .oneshot(get("/api/v1/jobs/job-999999"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "job job-999999 not found");
}

#[tokio::test]
async fn unregistered_candidate_maps_to_unauthorized() {
    let (state, _, _, job) = seeded_state();
    let router = marketplace_router(state);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/applications",
            json!({ "candidate_id": "cand-ghost", "job_id": job.id.0 }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "no signed-in profile for this identity");
}

#[tokio::test]
async fn blank_title_maps_to_bad_request() {
    let (state, _, _, _) = seeded_state();
    let router = marketplace_router(state);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/jobs",
            json!({
                "employer_id": "emp-1",
                "title": "   ",
                "location": "Remote",
                "description": "Listing without a name."
            }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "invalid argument: job title must not be empty");
}

#[tokio::test]
async fn storage_outage_maps_to_service_unavailable() {
    let state = Arc::new(MarketplaceState::new(Arc::new(UnavailableGateway)));
    let router = marketplace_router(state);

    let response = router
        .oneshot(get("/api/v1/jobs"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn identity_endpoint_seeds_the_profile() {
    let (state, _, _, _) = seeded_state();
    let router = marketplace_router(state);

    let event = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/identities",
            json!({
                "account": "emp-7",
                "role": "employer",
                "display_name": "New Ventures",
                "email": "emp-7@example.com"
            }),
        ))
        .await
        .expect("router responds");
    assert_eq!(event.status(), StatusCode::OK);

    let profile = router
        .oneshot(get("/api/v1/employers/emp-7/profile"))
        .await
        .expect("router responds");
    assert_eq!(profile.status(), StatusCode::OK);
    let body = json_body(profile).await;
    assert_eq!(body["company_name"], "New Ventures");
}

#[tokio::test]
async fn profile_update_endpoint_merges_fields() {
    let (state, _, _, _) = seeded_state();
    let router = marketplace_router(state);

    let updated = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/candidates/cand-1/profile",
            json!({ "experience_level": "senior", "preferred_job_type": "remote" }),
        ))
        .await
        .expect("router responds");
    assert_eq!(updated.status(), StatusCode::OK);

    let profile = router
        .oneshot(get("/api/v1/candidates/cand-1/profile"))
        .await
        .expect("router responds");
    let body = json_body(profile).await;
    assert_eq!(body["experience_level"], "senior");
    assert_eq!(body["preferred_job_type"], "remote");
    assert_eq!(body["display_name"], "Alex Doe");
}

#[tokio::test]
async fn listing_endpoints_project_jobs_and_applications() {
    let (state, _, candidate, job) = seeded_state();
    state
        .lifecycle
        .apply(&candidate, &job.id)
        .expect("application is accepted");
    let router = marketplace_router(state);

    let response = router
        .clone()
        .oneshot(get("/api/v1/employers/emp-1/jobs"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let owned = json_body(response).await;
    let owned = owned.as_array().expect("body is an array");
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0]["title"], "Frontend Developer");

    let response = router
        .clone()
        .oneshot(get(&format!("/api/v1/jobs/{}/applications", job.id)))
        .await
        .expect("router responds");
    let for_job = json_body(response).await;
    let for_job = for_job.as_array().expect("body is an array");
    assert_eq!(for_job.len(), 1);
    assert_eq!(for_job[0]["candidate_id"], "cand-1");

    let response = router
        .oneshot(get("/api/v1/candidates/cand-1/applications"))
        .await
        .expect("router responds");
    let for_candidate = json_body(response).await;
    let for_candidate = for_candidate.as_array().expect("body is an array");
    assert_eq!(for_candidate.len(), 1);
    assert_eq!(for_candidate[0]["job_title"], "Frontend Developer");
}

#[tokio::test]
async fn dashboard_endpoint_reports_stats() {
    let (state, _, candidate, job) = seeded_state();
    state
        .lifecycle
        .apply(&candidate, &job.id)
        .expect("application is accepted");
    let router = marketplace_router(state);

    let response = router
        .oneshot(get("/api/v1/employers/emp-1/dashboard"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["active_job_count"], 1);
    assert_eq!(body["total_applications"], 1);
}
