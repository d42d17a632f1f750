//! Sandbox personas used to quick-fill the form and to drive demos and tests.

use serde::Serialize;

use super::classification::OutcomeKind;
use super::domain::{AddressRecord, ApplicantRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SandboxPersona {
    pub key: &'static str,
    pub label: &'static str,
    /// Outcome the sandbox produces for this persona under the surname convention.
    pub expected: OutcomeKind,
    pub record: ApplicantRecord,
}

pub fn sandbox_personas() -> Vec<SandboxPersona> {
    vec![manual_review_persona(), denied_persona(), approved_persona()]
}

pub fn find_persona(key: &str) -> Option<SandboxPersona> {
    sandbox_personas()
        .into_iter()
        .find(|persona| persona.key.eq_ignore_ascii_case(key.trim()))
}

/// The empty form the applicant starts from.
pub fn blank_record() -> ApplicantRecord {
    ApplicantRecord::default()
}

pub fn manual_review_persona() -> SandboxPersona {
    SandboxPersona {
        key: "review",
        label: "Jessica Review (Manual Review)",
        expected: OutcomeKind::ManualReview,
        record: ApplicantRecord {
            first_name: "Jessica".to_string(),
            last_name: "Review".to_string(),
            address: AddressRecord {
                line1: "100 Test St".to_string(),
                line2: None,
                city: "Testville".to_string(),
                state: "NY".to_string(),
                zip: "10001".to_string(),
                country: "US".to_string(),
            },
            ssn: "123456789".to_string(),
            email: "jessica.review@example.com".to_string(),
            date_of_birth: "1995-05-15".to_string(),
        },
    }
}

pub fn denied_persona() -> SandboxPersona {
    SandboxPersona {
        key: "deny",
        label: "John Deny (Denied)",
        expected: OutcomeKind::Denied,
        record: ApplicantRecord {
            first_name: "John".to_string(),
            last_name: "Deny".to_string(),
            address: AddressRecord {
                line1: "200 Example Rd".to_string(),
                line2: None,
                city: "Sampletown".to_string(),
                state: "CA".to_string(),
                zip: "90001".to_string(),
                country: "US".to_string(),
            },
            ssn: "987654321".to_string(),
            email: "john.deny@example.com".to_string(),
            date_of_birth: "1990-10-10".to_string(),
        },
    }
}

pub fn approved_persona() -> SandboxPersona {
    SandboxPersona {
        key: "approve",
        label: "Maria Smith (Approved)",
        expected: OutcomeKind::Success,
        record: ApplicantRecord {
            first_name: "Maria".to_string(),
            last_name: "Smith".to_string(),
            address: AddressRecord {
                line1: "300 Sample Ave".to_string(),
                line2: Some("Apt 4B".to_string()),
                city: "Demoville".to_string(),
                state: "TX".to_string(),
                zip: "73301-0001".to_string(),
                country: "US".to_string(),
            },
            ssn: "111223333".to_string(),
            email: "maria.smith@example.com".to_string(),
            date_of_birth: "1988-02-29".to_string(),
        },
    }
}
