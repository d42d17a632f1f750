use crate::infra::build_verification_service;
use chrono::SecondsFormat;
use clap::Args;
use idv_intake::config::AppConfig;
use idv_intake::error::AppError;
use idv_intake::telemetry;
use idv_intake::workflows::verification::{
    find_persona, sandbox_personas, validate, ApplicantRecord, DecisionSource, SandboxPersona,
    SubmissionResult, ValidationErrorSet,
};
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Submit only this persona (review, deny, approve). Defaults to all personas.
    #[arg(long)]
    pub(crate) persona: Option<String>,
    /// Classify on the provider's decision field instead of the sandbox surname convention.
    #[arg(long)]
    pub(crate) provider_decision: bool,
    /// Print the raw provider response for each completed submission.
    #[arg(long)]
    pub(crate) show_response: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Path to an applicant record in the form's JSON shape
    #[arg(long)]
    pub(crate) file: PathBuf,
}

pub(crate) fn list_personas() {
    println!("Sandbox personas");
    for persona in sandbox_personas() {
        println!(
            "- {} | {} | expected {}",
            persona.key,
            persona.label,
            persona.expected.label()
        );
    }
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let record = load_record(&args.file)?;
    let errors = validate(&record);
    println!("{}", render_validation(&args.file, &errors));
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        persona,
        provider_decision,
        show_response,
    } = args;

    let mut config = AppConfig::load()?;
    if provider_decision {
        config.provider.decision_source = DecisionSource::ProviderDecision;
    }
    telemetry::init(&config.telemetry)?;

    let personas = select_personas(persona.as_deref())?;
    let service = build_verification_service(&config.provider)?;

    println!("Identity verification demo");
    println!(
        "Provider: {} (decision source: {:?})",
        config.provider.base_url, config.provider.decision_source
    );

    for persona in personas {
        let result = service.submit(&persona.record).await;
        println!("\n{}", render_submission(&persona, &result, show_response));
    }

    Ok(())
}

fn select_personas(key: Option<&str>) -> Result<Vec<SandboxPersona>, AppError> {
    match key {
        Some(key) => find_persona(key)
            .map(|persona| vec![persona])
            .ok_or_else(|| AppError::UnknownPersona(key.to_string())),
        None => Ok(sandbox_personas()),
    }
}

fn load_record(path: &Path) -> Result<ApplicantRecord, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let record = serde_json::from_str(&raw)?;
    Ok(record)
}

fn render_validation(path: &Path, errors: &ValidationErrorSet) -> String {
    if errors.is_empty() {
        return format!("{}: valid", path.display());
    }

    let mut lines = vec![format!(
        "{}: {} field error(s)",
        path.display(),
        errors.len()
    )];
    for error in errors.iter() {
        lines.push(format!("- {}: {}", error.field.key(), error.message()));
    }
    lines.join("\n")
}

fn render_submission(
    persona: &SandboxPersona,
    result: &SubmissionResult,
    show_response: bool,
) -> String {
    let mut lines = vec![persona.label.to_string()];

    match result {
        SubmissionResult::Rejected(errors) => {
            lines.push("Rejected before send".to_string());
            for error in errors.iter() {
                lines.push(format!("- {}: {}", error.field.key(), error.message()));
            }
        }
        SubmissionResult::Completed(receipt) => {
            let kind = receipt.outcome.kind();
            let matched = if kind == persona.expected {
                "as expected"
            } else {
                "differs from sandbox expectation"
            };
            lines.push(format!(
                "Outcome: {} ({}) at {}",
                kind.label(),
                matched,
                receipt
                    .completed_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
            lines.push(format!("Message: {}", receipt.outcome.message()));

            if show_response {
                if let Some(response) = receipt.outcome.provider_response() {
                    let body = serde_json::to_string_pretty(&response.body)
                        .unwrap_or_else(|_| response.body.to_string());
                    lines.push(format!("Provider response (HTTP {}):", response.status));
                    lines.push(body);
                }
            }
        }
    }

    lines.join("\n")
}
