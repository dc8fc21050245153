use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use loandesk::error::AppError;
use loandesk::workflows::assessment::{
    AnalysisSession, AnalyzedDocument, ApplicantProfile, CaseAssessment, ExtractionFailure,
    LoanRequest, ObligationRecord, PolicyConfig,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;

/// Full input set for one assessment. Every request recomputes from scratch;
/// nothing is stored server-side between calls.
#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    #[serde(default)]
    pub(crate) documents: Vec<AnalyzedDocument>,
    pub(crate) requested_amount: f64,
    #[serde(default)]
    pub(crate) requested_tenure_years: Option<u32>,
    #[serde(default = "default_interest_rate")]
    pub(crate) interest_rate_percent: f64,
    #[serde(default)]
    pub(crate) excluded_obligations: Vec<usize>,
    #[serde(default)]
    pub(crate) policy: Option<PolicyConfig>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) job_since_years: Option<f64>,
}

fn default_interest_rate() -> f64 {
    8.5
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessmentResponse {
    pub(crate) profile: ApplicantProfile,
    pub(crate) obligations: Vec<ObligationRecord>,
    pub(crate) extraction_failures: Vec<ExtractionFailure>,
    #[serde(flatten)]
    pub(crate) assessment: CaseAssessment,
}

pub(crate) fn service_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assessment", post(assessment_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn assessment_endpoint(
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let AssessmentRequest {
        documents,
        requested_amount,
        requested_tenure_years,
        interest_rate_percent,
        excluded_obligations,
        policy,
        today,
        job_since_years,
    } = payload;

    let mut session = AnalysisSession::new(policy.unwrap_or_default());
    session.load_documents(&documents);
    if let Some(years) = job_since_years {
        session.set_job_since_years(years);
    }

    let excluded: BTreeSet<usize> = excluded_obligations.into_iter().collect();
    for index in excluded {
        session
            .toggle_exclusion(index)
            .map_err(|err| AppError::InvalidInput(err.to_string()))?;
    }

    let (profile, obligations, extraction_failures) = match session.case() {
        Some(case) => (
            case.profile.clone(),
            case.obligations.clone(),
            case.extraction_failures.clone(),
        ),
        None => (ApplicantProfile::default(), Vec::new(), Vec::new()),
    };

    let request = LoanRequest {
        amount: requested_amount,
        tenure_years: requested_tenure_years,
        annual_rate_percent: interest_rate_percent,
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let assessment = session
        .run(&request, today)
        .map_err(|err| AppError::InvalidInput(err.to_string()))?
        .clone();

    Ok(Json(AssessmentResponse {
        profile,
        obligations,
        extraction_failures,
        assessment,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    fn sample_request() -> AssessmentRequest {
        let payload = json!({
            "documents": [
                {
                    "source": "slip.pdf",
                    "document_type": "salary_slip",
                    "earnings": {"basic": 45000, "hra": 20000, "special_allowance": 15000},
                    "employee_name": "Rahul Verma"
                },
                {
                    "source": "pan.jpg",
                    "document_type": "pan_card",
                    "name": "RAHUL VERMA",
                    "pan_number": "ABCDE1234F",
                    "date_of_birth": "15/06/1995"
                }
            ],
            "requested_amount": 2_000_000,
            "interest_rate_percent": 8.5,
            "today": "2025-09-15"
        });
        serde_json::from_value(payload).expect("valid request payload")
    }

    #[tokio::test]
    async fn assessment_endpoint_returns_the_full_result() {
        let Json(body) = assessment_endpoint(Json(sample_request()))
            .await
            .expect("assessment succeeds");

        assert_eq!(body.profile.applicant_name.as_deref(), Some("Rahul Verma"));
        assert_eq!(body.profile.pan_masked.as_deref(), Some("XXXXXX234F"));
        assert_eq!(
            body.assessment.eligibility.calculations.gross_monthly_income,
            80_000.0
        );
        assert!(body.assessment.eligibility.eligible);
        assert!(!body.assessment.queries.is_empty());
    }

    #[tokio::test]
    async fn invalid_exclusion_index_is_a_bad_request() {
        let mut request = sample_request();
        request.excluded_obligations = vec![3];

        let result = assessment_endpoint(Json(request)).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn policy_overrides_accept_whole_percentages() {
        let mut request = sample_request();
        request.policy = serde_json::from_value(json!({"foir_salaried_max": 10})).ok();

        let Json(body) = assessment_endpoint(Json(request))
            .await
            .expect("assessment succeeds");

        // a 10% FOIR cap blocks the same loan the default policy approves
        assert!(!body.assessment.eligibility.eligible);
    }

    #[tokio::test]
    async fn assessment_route_accepts_a_json_body() {
        let body = json!({
            "requested_amount": 1_000_000,
            "today": "2025-09-15"
        });

        let app = service_router();
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/api/v1/assessment")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(body.to_string()))
                    .expect("valid request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("readable body");
        let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        // no documents at all: zero income blocks the requested amount
        assert_eq!(payload["eligibility"]["eligible"], json!(false));
        assert_eq!(
            payload["eligibility"]["calculations"]["gross_monthly_income"],
            json!(0.0)
        );
    }

    #[tokio::test]
    async fn health_route_responds_ok() {
        let app = service_router();
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .expect("valid request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
