use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::ApplicantRecord;
use super::personas::sandbox_personas;
use super::provider::IdentityProvider;
use super::service::{SubmissionResult, VerificationService};

/// Router builder exposing the submission, validation, and persona endpoints.
pub fn verification_router<P>(service: Arc<VerificationService<P>>) -> Router
where
    P: IdentityProvider + 'static,
{
    Router::new()
        .route("/api/submit", post(submit_handler::<P>))
        .route("/api/validate", post(validate_handler::<P>))
        .route("/api/personas", get(personas_handler))
        .with_state(service)
}

pub(crate) async fn submit_handler<P>(
    State(service): State<Arc<VerificationService<P>>>,
    axum::Json(record): axum::Json<ApplicantRecord>,
) -> Response
where
    P: IdentityProvider + 'static,
{
    match service.submit(&record).await {
        SubmissionResult::Rejected(errors) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        SubmissionResult::Completed(receipt) if receipt.outcome.is_submission_error() => {
            let view = receipt.view();
            let payload = json!({
                "attempt_id": view.attempt_id,
                "outcome": view.outcome,
                "message": view.message,
                "errors": { "server": view.message },
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        SubmissionResult::Completed(receipt) => {
            (StatusCode::OK, axum::Json(receipt.view())).into_response()
        }
    }
}

pub(crate) async fn validate_handler<P>(
    State(service): State<Arc<VerificationService<P>>>,
    axum::Json(record): axum::Json<ApplicantRecord>,
) -> Response
where
    P: IdentityProvider + 'static,
{
    let errors = service.validate(&record);
    let status = if errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    let payload = json!({
        "valid": errors.is_empty(),
        "errors": errors,
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn personas_handler() -> Response {
    (StatusCode::OK, axum::Json(sandbox_personas())).into_response()
}
