use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Applicant form state collected for identity evaluation.
///
/// Every field arrives as a string (possibly empty); well-formedness is decided by
/// [`validate`](super::validation::validate), never by deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: AddressRecord,
    #[serde(default)]
    pub ssn: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, rename = "dob", alias = "dateOfBirth")]
    pub date_of_birth: String,
}

/// Postal address captured alongside the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(default)]
    pub line1: String,
    #[serde(default, serialize_with = "serialize_optional_line")]
    pub line2: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default = "default_country")]
    pub country: String,
}

pub const SUPPORTED_COUNTRY: &str = "US";

fn default_country() -> String {
    SUPPORTED_COUNTRY.to_string()
}

// The form always carries line2 as a string, empty when unused.
fn serialize_optional_line<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}

impl Default for AddressRecord {
    fn default() -> Self {
        Self {
            line1: String::new(),
            line2: None,
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: default_country(),
        }
    }
}

/// Form fields addressed by validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    FirstName,
    LastName,
    AddressLine1,
    AddressCity,
    AddressState,
    AddressZip,
    AddressCountry,
    Ssn,
    Email,
    DateOfBirth,
}

impl FieldPath {
    pub const fn key(self) -> &'static str {
        match self {
            FieldPath::FirstName => "firstName",
            FieldPath::LastName => "lastName",
            FieldPath::AddressLine1 => "address.line1",
            FieldPath::AddressCity => "address.city",
            FieldPath::AddressState => "address.state",
            FieldPath::AddressZip => "address.zip",
            FieldPath::AddressCountry => "address.country",
            FieldPath::Ssn => "ssn",
            FieldPath::Email => "email",
            FieldPath::DateOfBirth => "dob",
        }
    }
}

/// Rule that rejected a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    Required,
    StateFormat,
    ZipFormat,
    CountryUnsupported,
    SsnFormat,
    EmailFormat,
    DateFormat,
}

impl ValidationRule {
    /// Message shown next to the offending form field.
    pub const fn message(self) -> &'static str {
        match self {
            ValidationRule::Required => "Required",
            ValidationRule::StateFormat => "State must be 2 letters",
            ValidationRule::ZipFormat => "Zip must be 5 digits",
            ValidationRule::CountryUnsupported => "Country must be US",
            ValidationRule::SsnFormat => "SSN must be exactly 9 digits (no dashes)",
            ValidationRule::EmailFormat => "Email invalid",
            ValidationRule::DateFormat => "DOB must be YYYY-MM-DD",
        }
    }
}

/// Single field-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldPath,
    pub rule: ValidationRule,
}

impl FieldError {
    pub const fn message(&self) -> &'static str {
        self.rule.message()
    }
}

/// Field-level problems preventing submission. Empty means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrorSet {
    errors: BTreeMap<FieldPath, ValidationRule>,
}

impl ValidationErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reject(&mut self, field: FieldPath, rule: ValidationRule) {
        self.errors.insert(field, rule);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FieldPath) -> Option<FieldError> {
        self.errors
            .get(&field)
            .map(|rule| FieldError { field, rule: *rule })
    }

    pub fn contains(&self, field: FieldPath) -> bool {
        self.errors.contains_key(&field)
    }

    /// Look up an error by its wire key (e.g. `"address.zip"`).
    pub fn message_for(&self, key: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(field, _)| field.key() == key)
            .map(|(_, rule)| rule.message())
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.errors
            .iter()
            .map(|(field, rule)| FieldError {
                field: *field,
                rule: *rule,
            })
    }

    /// Field key to message mapping, as rendered next to the form inputs.
    pub fn messages(&self) -> BTreeMap<&'static str, &'static str> {
        self.iter()
            .map(|error| (error.field.key(), error.message()))
            .collect()
    }
}

impl Serialize for ValidationErrorSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.messages().serialize(serializer)
    }
}
