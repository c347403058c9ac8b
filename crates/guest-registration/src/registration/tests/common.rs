use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::config::FormConfig;
use crate::registration::capabilities::{
    SignatureCapability, SubmissionError, SubmissionReceipt, SubmissionSink, UploadCapability,
};
use crate::registration::domain::{
    FileHandle, FormAggregate, GuestField, GuestRecord, Nationality, RegistrationPayload, Sex,
    SignaturePayload, TermsAcceptance,
};
use crate::registration::engine::{FormEvent, FormStateEngine};

#[derive(Default)]
pub(super) struct MemorySink {
    deliveries: Mutex<Vec<RegistrationPayload>>,
}

impl SubmissionSink for MemorySink {
    fn deliver(
        &self,
        payload: &RegistrationPayload,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let mut guard = self.deliveries.lock().expect("sink mutex poisoned");
        guard.push(payload.clone());
        Ok(SubmissionReceipt {
            reference: format!("reg-{:04}", guard.len()),
            submitted_at,
        })
    }
}

impl MemorySink {
    pub(super) fn deliveries(&self) -> Vec<RegistrationPayload> {
        self.deliveries.lock().expect("sink mutex poisoned").clone()
    }
}

pub(super) struct OfflineSink;

impl SubmissionSink for OfflineSink {
    fn deliver(
        &self,
        _payload: &RegistrationPayload,
        _submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Transport("registry offline".to_string()))
    }
}

pub(super) struct StaticUploads(pub(super) Vec<FileHandle>);

impl UploadCapability for StaticUploads {
    fn select_files(&mut self) -> Vec<FileHandle> {
        self.0.clone()
    }
}

pub(super) struct StaticSignaturePad(pub(super) &'static str);

impl SignatureCapability for StaticSignaturePad {
    fn capture(&mut self) -> SignaturePayload {
        SignaturePayload(self.0.to_string())
    }
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 14, 16, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn passport() -> FileHandle {
    FileHandle::new("passport-front.jpg", 820_000)
}

pub(super) fn certificate() -> FileHandle {
    FileHandle::new("acte-de-mariage.pdf", 1_300_000)
}

pub(super) fn signature() -> SignaturePayload {
    SignaturePayload("data:image/png;base64,iVBORw0KGgo=".to_string())
}

pub(super) fn guest(name: &str, sex: Sex, nationality: Nationality) -> GuestRecord {
    GuestRecord::new(name, sex, nationality)
}

pub(super) fn guest_with_raw_nationality(sex: Sex, nationality: &str) -> GuestRecord {
    GuestRecord {
        full_name: "Sam Guest".to_string(),
        sex: Some(sex),
        nationality: nationality.to_string(),
    }
}

/// Two fully valid guests that do not trigger the marriage certificate.
pub(super) fn valid_aggregate() -> FormAggregate {
    FormAggregate {
        number_of_guests: 2,
        guests: vec![
            guest("Claire Martin", Sex::Female, Nationality::French),
            guest("John Miller", Sex::Male, Nationality::American),
        ],
        identification: vec![passport()],
        marriage_certificate: Vec::new(),
        terms_accepted: Some(TermsAcceptance::Accepted),
        signature: signature(),
    }
}

pub(super) fn engine() -> (FormStateEngine<MemorySink>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    let engine = FormStateEngine::new(sink.clone(), FormConfig::default());
    (engine, sink)
}

pub(super) fn count(value: &str) -> FormEvent {
    FormEvent::GuestCountChanged {
        value: value.to_string(),
    }
}

pub(super) fn edit(index: usize, field: GuestField, value: &str) -> FormEvent {
    FormEvent::GuestFieldChanged {
        index,
        field,
        value: value.to_string(),
    }
}

pub(super) fn fill_guest<S>(
    engine: &mut FormStateEngine<S>,
    index: usize,
    name: &str,
    sex: Sex,
    nationality: Nationality,
) where
    S: SubmissionSink,
{
    engine
        .apply(edit(index, GuestField::FullName, name))
        .expect("name applies");
    engine
        .apply(edit(index, GuestField::Sex, sex.label()))
        .expect("sex applies");
    engine
        .apply(edit(index, GuestField::Nationality, nationality.as_str()))
        .expect("nationality applies");
}

/// Identification, terms and signature filled in; guests left to the caller.
pub(super) fn complete_paperwork<S>(engine: &mut FormStateEngine<S>)
where
    S: SubmissionSink,
{
    engine
        .apply(FormEvent::IdentificationSelected {
            files: vec![passport()],
        })
        .expect("identification applies");
    engine
        .apply(FormEvent::TermsChanged {
            value: "accepted".to_string(),
        })
        .expect("terms apply");
    engine
        .apply(FormEvent::SignatureCaptured {
            signature: signature(),
        })
        .expect("signature applies");
}
