//! End-to-end scenarios for the verification intake pipeline.
//!
//! Each scenario drives the public service facade against a wiremock provider so the real
//! HTTP client, payload mapping, and classification run together.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use idv_intake::workflows::verification::{
    find_persona, HttpIdentityProvider, IdentityProvider, Outcome, OutcomeKind, ProviderError,
    SubmissionResult, VerificationService,
};

const API_KEY: &str = "Basic c2FuZGJveDpzZWNyZXQ=";

fn provider_for(server: &MockServer) -> HttpIdentityProvider {
    let base = Url::parse(&server.uri()).expect("mock server uri");
    HttpIdentityProvider::new(&base, API_KEY, Duration::from_secs(5)).expect("client builds")
}

fn decision_body() -> Value {
    json!({
        "status_code": 201,
        "evaluation_token": "L-abc123",
        "summary": { "result": "success", "outcome": "Approved" }
    })
}

#[tokio::test]
async fn jessica_review_is_sent_with_credential_and_lands_in_manual_review() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/evaluations"))
        .and(header("authorization", API_KEY))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "name_first": "Jessica",
            "name_last": "Review",
            "birth_date": "1995-05-15",
            "document_ssn": "123456789",
            "address_line_1": "100 Test St",
            "address_city": "Testville",
            "address_state": "NY",
            "address_postal_code": "10001",
            "address_country_code": "US",
            "email_address": "jessica.review@example.com",
            "entity_type": "individual"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(decision_body()))
        .expect(1)
        .mount(&server)
        .await;

    let service = VerificationService::new(Arc::new(provider_for(&server)));
    let persona = find_persona("review").expect("persona exists");

    match service.submit(&persona.record).await {
        SubmissionResult::Completed(receipt) => {
            assert_eq!(receipt.outcome.kind(), OutcomeKind::ManualReview);
            assert_eq!(
                receipt.outcome.message(),
                "Thanks for submitting your application, we'll be in touch shortly!"
            );
            let response = receipt
                .outcome
                .provider_response()
                .expect("raw response retained");
            assert_eq!(response.status, 201);
            assert_eq!(response.body["evaluation_token"], "L-abc123");
        }
        other => panic!("expected completed submission, got {other:?}"),
    }

    server.verify().await;
}

#[tokio::test]
async fn rejected_records_never_reach_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(decision_body()))
        .expect(0)
        .mount(&server)
        .await;

    let service = VerificationService::new(Arc::new(provider_for(&server)));
    let mut record = find_persona("deny").expect("persona exists").record;
    record.email = "not-an-email".to_string();

    let result = service.submit(&record).await;
    let errors = result.errors().expect("rejected before send");
    assert_eq!(errors.message_for("email"), Some("Email invalid"));

    server.verify().await;
}

#[tokio::test]
async fn unauthorized_provider_yields_submission_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/evaluations"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = VerificationService::new(Arc::new(provider_for(&server)));
    let persona = find_persona("approve").expect("persona exists");

    let result = service.submit(&persona.record).await;
    match result.outcome() {
        Some(Outcome::SubmissionError(failure)) => {
            assert_eq!(failure.status, Some(401));
        }
        other => panic!("expected submission error, got {other:?}"),
    }

    server.verify().await;
}

#[tokio::test]
async fn non_json_success_body_is_a_submission_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let payload = idv_intake::workflows::verification::to_provider_payload(
        &find_persona("approve").expect("persona exists").record,
    );

    match provider.evaluate(&payload).await {
        Err(ProviderError::MalformedBody(_)) => {}
        other => panic!("expected malformed body error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_provider_yields_submission_error() {
    // Nothing listens on the discard port locally.
    let base = Url::parse("http://127.0.0.1:9").expect("valid url");

    let provider =
        HttpIdentityProvider::new(&base, API_KEY, Duration::from_secs(2)).expect("client builds");
    let service = VerificationService::new(Arc::new(provider));
    let persona = find_persona("deny").expect("persona exists");

    let result = service.submit(&persona.record).await;
    assert_eq!(
        result.outcome().map(Outcome::kind),
        Some(OutcomeKind::SubmissionError)
    );
}

#[tokio::test]
async fn slow_provider_times_out_into_submission_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(decision_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let base = Url::parse(&server.uri()).expect("mock server uri");
    let provider = HttpIdentityProvider::new(&base, API_KEY, Duration::from_millis(200))
        .expect("client builds");
    let service = VerificationService::new(Arc::new(provider));
    let persona = find_persona("approve").expect("persona exists");

    let result = service.submit(&persona.record).await;
    assert_eq!(
        result.outcome().map(Outcome::kind),
        Some(OutcomeKind::SubmissionError)
    );
}
