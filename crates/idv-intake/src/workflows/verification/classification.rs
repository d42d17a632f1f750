use serde::Serialize;
use serde_json::Value;

use super::domain::ApplicantRecord;
use super::provider::{ProviderError, ProviderHttpResult, ProviderResponse};

pub const SUCCESS_MESSAGE: &str = "Fantastic, you have created an account with Best Bank!";
pub const MANUAL_REVIEW_MESSAGE: &str =
    "Thanks for submitting your application, we'll be in touch shortly!";
pub const DENIED_MESSAGE: &str = "Sorry, your application was not successful.";
pub const SUBMISSION_ERROR_MESSAGE: &str = "Failed to submit form";

/// Where the classifier reads the decision from.
///
/// `Surname` reproduces the sandbox persona convention (last name "Review" or
/// "Deny"); `ProviderDecision` reads `summary.outcome` from the provider body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    #[default]
    Surname,
    ProviderDecision,
}

impl DecisionSource {
    pub fn from_setting(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "provider" | "provider_decision" | "decision" => Self::ProviderDecision,
            _ => Self::Surname,
        }
    }
}

/// Outcome category without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Success,
    ManualReview,
    Denied,
    SubmissionError,
}

impl OutcomeKind {
    pub const fn label(self) -> &'static str {
        match self {
            OutcomeKind::Success => "success",
            OutcomeKind::ManualReview => "manual_review",
            OutcomeKind::Denied => "denied",
            OutcomeKind::SubmissionError => "submission_error",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            OutcomeKind::Success => SUCCESS_MESSAGE,
            OutcomeKind::ManualReview => MANUAL_REVIEW_MESSAGE,
            OutcomeKind::Denied => DENIED_MESSAGE,
            OutcomeKind::SubmissionError => SUBMISSION_ERROR_MESSAGE,
        }
    }
}

/// Operator-facing detail for a failed submission. Never shown to the applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionFailure {
    pub status: Option<u16>,
    pub detail: String,
    /// Error body the provider returned with a non-success status.
    pub body: Option<Value>,
}

impl From<ProviderError> for SubmissionFailure {
    fn from(error: ProviderError) -> Self {
        let status = error.status();
        let detail = error.to_string();
        let body = match error {
            ProviderError::Status { body, .. } => Some(body),
            _ => None,
        };

        Self {
            status,
            detail,
            body,
        }
    }
}

/// Decision reached for a request the provider accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Approve,
    Review,
    Deny,
}

/// Final categorized result of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(ProviderResponse),
    ManualReview(ProviderResponse),
    Denied(ProviderResponse),
    SubmissionError(SubmissionFailure),
}

impl Outcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Success(_) => OutcomeKind::Success,
            Outcome::ManualReview(_) => OutcomeKind::ManualReview,
            Outcome::Denied(_) => OutcomeKind::Denied,
            Outcome::SubmissionError(_) => OutcomeKind::SubmissionError,
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind().message()
    }

    pub fn provider_response(&self) -> Option<&ProviderResponse> {
        match self {
            Outcome::Success(response)
            | Outcome::ManualReview(response)
            | Outcome::Denied(response) => Some(response),
            Outcome::SubmissionError(_) => None,
        }
    }

    pub fn is_submission_error(&self) -> bool {
        matches!(self, Outcome::SubmissionError(_))
    }
}

/// Classify with the sandbox surname convention.
pub fn classify(record: &ApplicantRecord, result: ProviderHttpResult) -> Outcome {
    classify_with(DecisionSource::Surname, record, result)
}

pub fn classify_with(
    source: DecisionSource,
    record: &ApplicantRecord,
    result: ProviderHttpResult,
) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(error) => return Outcome::SubmissionError(SubmissionFailure::from(error)),
    };

    let decision = match source {
        DecisionSource::Surname => decision_from_surname(&record.last_name),
        DecisionSource::ProviderDecision => decision_from_provider(&response),
    };

    match decision {
        Decision::Approve => Outcome::Success(response),
        Decision::Review => Outcome::ManualReview(response),
        Decision::Deny => Outcome::Denied(response),
    }
}

fn decision_from_surname(last_name: &str) -> Decision {
    match last_name.to_lowercase().as_str() {
        "review" => Decision::Review,
        "deny" => Decision::Deny,
        _ => Decision::Approve,
    }
}

// Unknown or missing decisions count as success, mirroring the surname mode.
fn decision_from_provider(response: &ProviderResponse) -> Decision {
    let decision = response
        .body
        .pointer("/summary/outcome")
        .and_then(|value| value.as_str())
        .map(|value| value.trim().to_ascii_lowercase());

    match decision.as_deref() {
        Some("manual review") | Some("manual_review") | Some("review") => Decision::Review,
        Some("denied") | Some("deny") => Decision::Deny,
        _ => Decision::Approve,
    }
}
