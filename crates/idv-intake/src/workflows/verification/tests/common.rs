use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::verification::domain::ApplicantRecord;
use crate::workflows::verification::payload::ProviderPayload;
use crate::workflows::verification::personas::{approved_persona, manual_review_persona};
use crate::workflows::verification::provider::{
    IdentityProvider, ProviderError, ProviderHttpResult, ProviderResponse,
};
use crate::workflows::verification::{verification_router, VerificationService};

pub(super) fn valid_record() -> ApplicantRecord {
    approved_persona().record
}

pub(super) fn review_record() -> ApplicantRecord {
    manual_review_persona().record
}

pub(super) fn record_with_last_name(last_name: &str) -> ApplicantRecord {
    let mut record = valid_record();
    record.last_name = last_name.to_string();
    record
}

pub(super) fn sandbox_decision() -> Value {
    json!({
        "status_code": 201,
        "evaluation_token": "L-sandbox-0001",
        "summary": {
            "result": "success",
            "outcome": "Approved"
        }
    })
}

pub(super) fn ok_response(body: Value) -> ProviderHttpResult {
    Ok(ProviderResponse { status: 201, body })
}

pub(super) fn status_failure(status: u16) -> ProviderHttpResult {
    Err(ProviderError::Status {
        status,
        body: json!({ "error": "unauthorized" }),
    })
}

#[derive(Debug, Clone)]
pub(super) enum StubReply {
    Decision(Value),
    Status(u16),
    Malformed,
}

/// In-memory provider recording every payload it receives.
#[derive(Clone)]
pub(super) struct StubProvider {
    reply: StubReply,
    calls: Arc<Mutex<Vec<ProviderPayload>>>,
}

impl StubProvider {
    pub(super) fn replying(reply: StubReply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(super) fn approving() -> Self {
        Self::replying(StubReply::Decision(sandbox_decision()))
    }

    pub(super) fn calls(&self) -> Vec<ProviderPayload> {
        self.calls.lock().expect("stub mutex poisoned").clone()
    }
}

impl IdentityProvider for StubProvider {
    async fn evaluate(&self, payload: &ProviderPayload) -> ProviderHttpResult {
        self.calls
            .lock()
            .expect("stub mutex poisoned")
            .push(payload.clone());

        match &self.reply {
            StubReply::Decision(body) => ok_response(body.clone()),
            StubReply::Status(status) => status_failure(*status),
            StubReply::Malformed => Err(ProviderError::MalformedBody(
                "expected value at line 1 column 1".to_string(),
            )),
        }
    }
}

pub(super) fn build_service(
    reply: StubReply,
) -> (VerificationService<StubProvider>, Arc<StubProvider>) {
    let provider = Arc::new(StubProvider::replying(reply));
    let service = VerificationService::new(provider.clone());
    (service, provider)
}

pub(super) fn router_with_service(service: VerificationService<StubProvider>) -> axum::Router {
    verification_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
