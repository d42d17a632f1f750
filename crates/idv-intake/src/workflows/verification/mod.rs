//! Identity verification intake: field validation, provider payload mapping,
//! outcome classification, and the orchestrator that ties them together.

pub mod classification;
pub mod domain;
pub mod payload;
pub mod personas;
pub mod provider;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use classification::{
    classify, classify_with, DecisionSource, Outcome, OutcomeKind, SubmissionFailure,
};
pub use domain::{
    AddressRecord, ApplicantRecord, FieldError, FieldPath, ValidationErrorSet, ValidationRule,
};
pub use payload::{to_provider_payload, ProviderPayload, ENTITY_TYPE_INDIVIDUAL};
pub use personas::{find_persona, sandbox_personas, SandboxPersona};
pub use provider::{
    HttpIdentityProvider, IdentityProvider, ProviderError, ProviderHttpResult, ProviderResponse,
};
pub use router::verification_router;
pub use service::{
    AttemptId, SubmissionPhase, SubmissionReceipt, SubmissionResult, SubmissionView,
    VerificationService,
};
pub use validation::validate;
