use serde::Serialize;

use super::domain::ApplicantRecord;

/// Entity classification the evaluations schema requires on every request.
pub const ENTITY_TYPE_INDIVIDUAL: &str = "individual";

/// Flat request body in the provider's evaluation schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderPayload {
    pub name_first: String,
    pub name_last: String,
    pub birth_date: String,
    pub document_ssn: String,
    pub address_line_1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    pub address_city: String,
    pub address_state: String,
    pub address_postal_code: String,
    pub address_country_code: String,
    pub email_address: String,
    pub entity_type: &'static str,
}

/// Rename and flatten a validated record into the provider schema.
///
/// Performs no validation; callers must run `validate` first.
pub fn to_provider_payload(record: &ApplicantRecord) -> ProviderPayload {
    let address = &record.address;

    ProviderPayload {
        name_first: record.first_name.clone(),
        name_last: record.last_name.clone(),
        birth_date: record.date_of_birth.clone(),
        document_ssn: record.ssn.clone(),
        address_line_1: address.line1.clone(),
        address_line_2: address
            .line2
            .as_deref()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string),
        address_city: address.city.clone(),
        address_state: address.state.clone(),
        address_postal_code: address.zip.clone(),
        address_country_code: address.country.clone(),
        email_address: record.email.clone(),
        entity_type: ENTITY_TYPE_INDIVIDUAL,
    }
}
