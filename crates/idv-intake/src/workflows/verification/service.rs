use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::classification::{classify_with, DecisionSource, Outcome, OutcomeKind};
use super::domain::{ApplicantRecord, ValidationErrorSet};
use super::payload::to_provider_payload;
use super::provider::IdentityProvider;
use super::validation::validate;

/// Identifier for a single submission attempt, used to correlate logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AttemptId(pub String);

static ATTEMPT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_attempt_id() -> AttemptId {
    let id = ATTEMPT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AttemptId(format!("sub-{id:06}"))
}

/// Lifecycle of one submission attempt. `Rejected` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Validating,
    Rejected,
    Sending,
    Completed,
}

impl SubmissionPhase {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::Rejected => "rejected",
            SubmissionPhase::Sending => "sending",
            SubmissionPhase::Completed => "completed",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, SubmissionPhase::Rejected | SubmissionPhase::Completed)
    }

    const fn can_advance_to(self, next: SubmissionPhase) -> bool {
        matches!(
            (self, next),
            (SubmissionPhase::Idle, SubmissionPhase::Validating)
                | (SubmissionPhase::Validating, SubmissionPhase::Rejected)
                | (SubmissionPhase::Validating, SubmissionPhase::Sending)
                | (SubmissionPhase::Sending, SubmissionPhase::Completed)
        )
    }
}

struct SubmissionAttempt {
    id: AttemptId,
    phase: SubmissionPhase,
}

impl SubmissionAttempt {
    fn start() -> Self {
        Self {
            id: next_attempt_id(),
            phase: SubmissionPhase::Idle,
        }
    }

    fn advance(&mut self, next: SubmissionPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid submission transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!(
            attempt = %self.id.0,
            from = self.phase.label(),
            to = next.label(),
            "submission phase changed"
        );
        self.phase = next;
    }
}

/// Terminal result of `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    /// Rejected before send; the provider was not contacted.
    Rejected(ValidationErrorSet),
    Completed(SubmissionReceipt),
}

impl SubmissionResult {
    pub fn phase(&self) -> SubmissionPhase {
        match self {
            SubmissionResult::Rejected(_) => SubmissionPhase::Rejected,
            SubmissionResult::Completed(_) => SubmissionPhase::Completed,
        }
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            SubmissionResult::Rejected(_) => None,
            SubmissionResult::Completed(receipt) => Some(&receipt.outcome),
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrorSet> {
        match self {
            SubmissionResult::Rejected(errors) => Some(errors),
            SubmissionResult::Completed(_) => None,
        }
    }
}

/// Classified outcome of an attempt that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub attempt_id: AttemptId,
    pub outcome: Outcome,
    pub completed_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn view(&self) -> SubmissionView {
        SubmissionView {
            attempt_id: self.attempt_id.clone(),
            outcome: self.outcome.kind(),
            message: self.outcome.message(),
            provider_response: self
                .outcome
                .provider_response()
                .map(|response| response.body.clone()),
            completed_at: self.completed_at,
        }
    }
}

/// Applicant-facing representation of a receipt. Failure detail is never included.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    pub attempt_id: AttemptId,
    pub outcome: OutcomeKind,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<Value>,
    pub completed_at: DateTime<Utc>,
}

/// Service composing validation, payload mapping, the provider call, and classification.
pub struct VerificationService<P> {
    provider: Arc<P>,
    decision_source: DecisionSource,
}

impl<P> VerificationService<P>
where
    P: IdentityProvider + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            decision_source: DecisionSource::default(),
        }
    }

    pub fn with_decision_source(mut self, decision_source: DecisionSource) -> Self {
        self.decision_source = decision_source;
        self
    }

    pub fn decision_source(&self) -> DecisionSource {
        self.decision_source
    }

    /// Run the shared field validator without contacting the provider.
    pub fn validate(&self, record: &ApplicantRecord) -> ValidationErrorSet {
        validate(record)
    }

    /// Validate, then send at most one evaluation request and classify the result.
    pub async fn submit(&self, record: &ApplicantRecord) -> SubmissionResult {
        let mut attempt = SubmissionAttempt::start();

        attempt.advance(SubmissionPhase::Validating);
        let errors = validate(record);
        if !errors.is_empty() {
            attempt.advance(SubmissionPhase::Rejected);
            let fields: Vec<&str> = errors.iter().map(|error| error.field.key()).collect();
            info!(
                attempt = %attempt.id.0,
                ?fields,
                "submission rejected before send"
            );
            return SubmissionResult::Rejected(errors);
        }

        let payload = to_provider_payload(record);
        attempt.advance(SubmissionPhase::Sending);
        let result = self.provider.evaluate(&payload).await;

        let outcome = classify_with(self.decision_source, record, result);
        if let Outcome::SubmissionError(failure) = &outcome {
            let provider_body = failure
                .body
                .as_ref()
                .map(Value::to_string)
                .unwrap_or_default();
            warn!(
                attempt = %attempt.id.0,
                status = ?failure.status,
                detail = %failure.detail,
                %provider_body,
                "provider evaluation failed"
            );
        }
        attempt.advance(SubmissionPhase::Completed);
        info!(
            attempt = %attempt.id.0,
            outcome = outcome.kind().label(),
            "submission completed"
        );

        SubmissionResult::Completed(SubmissionReceipt {
            attempt_id: attempt.id,
            outcome,
            completed_at: Utc::now(),
        })
    }
}
