use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use idv_intake::config::ProviderConfig;
use idv_intake::error::AppError;
use idv_intake::workflows::verification::{HttpIdentityProvider, VerificationService};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Wire the HTTP provider client into the orchestrator using explicit configuration.
pub(crate) fn build_verification_service(
    config: &ProviderConfig,
) -> Result<VerificationService<HttpIdentityProvider>, AppError> {
    let provider = HttpIdentityProvider::from_config(config)?;
    Ok(VerificationService::new(Arc::new(provider)).with_decision_source(config.decision_source))
}
