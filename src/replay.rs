use crate::infra::{parse_timestamp, InMemorySubmissionSink};
use chrono::{DateTime, Utc};
use clap::Args;
use guest_registration::config::FormConfig;
use guest_registration::error::AppError;
use guest_registration::registration::{
    FormEvent, FormState, FormStateEngine, RegistrationPayload, SubmissionReceipt, SubmitError,
    ValidationErrors,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// JSON file holding an array of form events
    #[arg(long)]
    pub(crate) script: PathBuf,
    /// Submission timestamp (RFC 3339, defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReplayReport {
    pub(crate) state: FormState,
    pub(crate) requires_marriage_certificate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) receipt: Option<SubmissionReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) payload: Option<RegistrationPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) errors: Option<ValidationErrors>,
}

pub(crate) fn run_replay(args: ReplayArgs, form: FormConfig) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.script)?;
    let events: Vec<FormEvent> = serde_json::from_str(&raw)?;
    let submitted_at = args.submitted_at.unwrap_or_else(Utc::now);

    let sink = Arc::new(InMemorySubmissionSink::default());
    let report = replay_events(events, form, sink, submitted_at)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn replay_events(
    events: Vec<FormEvent>,
    form: FormConfig,
    sink: Arc<InMemorySubmissionSink>,
    submitted_at: DateTime<Utc>,
) -> Result<ReplayReport, AppError> {
    let mut engine = FormStateEngine::new(sink.clone(), form);
    for event in events {
        engine.apply(event)?;
    }

    let requires_marriage_certificate = engine.requires_marriage_certificate();
    let (receipt, errors) = match engine.submit(submitted_at) {
        Ok(receipt) => (Some(receipt), None),
        Err(SubmitError::Invalid(errors)) => (None, Some(errors)),
        Err(other) => return Err(other.into()),
    };
    let payload = receipt.as_ref().and_then(|_| sink.latest());

    Ok(ReplayReport {
        state: engine.state(),
        requires_marriage_certificate,
        receipt,
        payload,
        errors,
    })
}
