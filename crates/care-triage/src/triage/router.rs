use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::alerts::AlertPublisher;
use super::engagement::CaseEngagementHistory;
use super::service::{
    AvailabilityRequest, IntakeSubmission, RecommendRequest, RiskScoreRequest, TriageService,
    TriageServiceError,
};

/// Router builder exposing the triage endpoints.
pub fn triage_router<A>(service: Arc<TriageService<A>>) -> Router
where
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/intake/assess", post(assess_handler::<A>))
        .route("/api/v1/risk/score", post(score_handler::<A>))
        .route("/api/v1/matching/recommend", post(recommend_handler::<A>))
        .route(
            "/api/v1/matching/availability",
            post(availability_handler::<A>),
        )
        .route("/api/v1/engagement/predict", post(predict_handler::<A>))
        .with_state(service)
}

pub(crate) async fn assess_handler<A>(
    State(service): State<Arc<TriageService<A>>>,
    Json(submission): Json<IntakeSubmission>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    match service.assess_intake(submission) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn score_handler<A>(
    State(service): State<Arc<TriageService<A>>>,
    Json(request): Json<RiskScoreRequest>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    (StatusCode::OK, Json(service.score(&request))).into_response()
}

pub(crate) async fn recommend_handler<A>(
    State(service): State<Arc<TriageService<A>>>,
    Json(request): Json<RecommendRequest>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    let recommendations = service.recommend(&request);
    let payload = json!({
        "count": recommendations.len(),
        "recommendations": recommendations,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn availability_handler<A>(
    State(service): State<Arc<TriageService<A>>>,
    Json(request): Json<AvailabilityRequest>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    let available = service.availability(&request);
    let payload = json!({
        "count": available.len(),
        "available_providers": available,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn predict_handler<A>(
    State(service): State<Arc<TriageService<A>>>,
    Json(history): Json<CaseEngagementHistory>,
) -> Response
where
    A: AlertPublisher + 'static,
{
    match service.predict(&history) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: TriageServiceError) -> Response {
    let status = match err {
        TriageServiceError::Screening(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TriageServiceError::Alert(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
