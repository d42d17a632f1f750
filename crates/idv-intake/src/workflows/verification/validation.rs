//! Field-level validation shared by the HTTP boundary and the submission orchestrator.

use std::sync::OnceLock;

use regex::Regex;

use super::domain::{
    ApplicantRecord, FieldPath, ValidationErrorSet, ValidationRule, SUPPORTED_COUNTRY,
};

struct FieldPatterns {
    state: Regex,
    zip: Regex,
    ssn: Regex,
    // Deliberately permissive: local@domain.tld with no whitespace.
    email: Regex,
    // Shape only, no calendar check.
    date_of_birth: Regex,
}

impl FieldPatterns {
    fn new() -> Self {
        Self {
            state: Regex::new(r"^[A-Za-z]{2}$").expect("valid state regex"),
            zip: Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("valid zip regex"),
            ssn: Regex::new(r"^[0-9]{9}$").expect("valid ssn regex"),
            email: Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"),
            date_of_birth: Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"),
        }
    }
}

static FIELD_PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();

fn patterns() -> &'static FieldPatterns {
    FIELD_PATTERNS.get_or_init(FieldPatterns::new)
}

/// Check every field of the record, collecting all failures.
pub fn validate(record: &ApplicantRecord) -> ValidationErrorSet {
    let patterns = patterns();
    let mut errors = ValidationErrorSet::new();

    let required = [
        (FieldPath::FirstName, record.first_name.as_str()),
        (FieldPath::LastName, record.last_name.as_str()),
        (FieldPath::AddressLine1, record.address.line1.as_str()),
        (FieldPath::AddressCity, record.address.city.as_str()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.reject(field, ValidationRule::Required);
        }
    }

    let formatted = [
        (
            FieldPath::AddressState,
            &patterns.state,
            record.address.state.as_str(),
            ValidationRule::StateFormat,
        ),
        (
            FieldPath::AddressZip,
            &patterns.zip,
            record.address.zip.as_str(),
            ValidationRule::ZipFormat,
        ),
        (
            FieldPath::Ssn,
            &patterns.ssn,
            record.ssn.as_str(),
            ValidationRule::SsnFormat,
        ),
        (
            FieldPath::Email,
            &patterns.email,
            record.email.as_str(),
            ValidationRule::EmailFormat,
        ),
        (
            FieldPath::DateOfBirth,
            &patterns.date_of_birth,
            record.date_of_birth.as_str(),
            ValidationRule::DateFormat,
        ),
    ];
    for (field, pattern, value, rule) in formatted {
        if !pattern.is_match(value) {
            errors.reject(field, rule);
        }
    }

    if record.address.country != SUPPORTED_COUNTRY {
        errors.reject(FieldPath::AddressCountry, ValidationRule::CountryUnsupported);
    }

    errors
}
