use std::future::Future;
use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::payload::ProviderPayload;
use crate::config::ProviderConfig;

const EVALUATIONS_PATH: &str = "v1/evaluations";

/// Decision object returned by the provider on a 2xx response.
///
/// The body is kept opaque; nothing here validates its schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: Value,
}

/// Result of the single outbound evaluation call.
pub type ProviderHttpResult = Result<ProviderResponse, ProviderError>;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}")]
    Status { status: u16, body: Value },
    #[error("provider response was not valid JSON: {0}")]
    MalformedBody(String),
    #[error("provider endpoint is invalid: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("provider credential cannot be sent as a header")]
    InvalidCredential,
}

impl ProviderError {
    /// HTTP status reported by the provider, when it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            ProviderError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

/// External identity-decisioning collaborator.
pub trait IdentityProvider: Send + Sync {
    fn evaluate(
        &self,
        payload: &ProviderPayload,
    ) -> impl Future<Output = ProviderHttpResult> + Send;
}

/// Provider client posting evaluations over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    endpoint: Url,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &Url, api_key: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let endpoint = evaluations_endpoint(base_url)?;

        let mut credential =
            HeaderValue::from_str(api_key).map_err(|_| ProviderError::InvalidCredential)?;
        credential.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, credential);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Self::new(&config.base_url, &config.api_key, config.timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn evaluate(&self, payload: &ProviderPayload) -> ProviderHttpResult {
        debug!(endpoint = %self.endpoint, "posting evaluation to provider");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "provider responded");

        if !status.is_success() {
            let body = serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = serde_json::from_slice(&bytes)
            .map_err(|err| ProviderError::MalformedBody(err.to_string()))?;

        Ok(ProviderResponse {
            status: status.as_u16(),
            body,
        })
    }
}

fn evaluations_endpoint(base_url: &Url) -> Result<Url, url::ParseError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(EVALUATIONS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_evaluations_path() {
        let base = Url::parse("https://sandbox.alloy.co").expect("valid url");
        assert_eq!(
            evaluations_endpoint(&base).expect("joins").as_str(),
            "https://sandbox.alloy.co/v1/evaluations"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let base = Url::parse("http://gateway.internal/alloy").expect("valid url");
        assert_eq!(
            evaluations_endpoint(&base).expect("joins").as_str(),
            "http://gateway.internal/alloy/v1/evaluations"
        );
    }

    #[test]
    fn rejects_credentials_with_control_characters() {
        let base = Url::parse("https://sandbox.alloy.co").expect("valid url");
        let result = HttpIdentityProvider::new(&base, "key\nwith-newline", Duration::from_secs(1));
        assert!(matches!(result, Err(ProviderError::InvalidCredential)));
    }
}
