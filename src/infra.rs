use chrono::{DateTime, Utc};
use guest_registration::registration::{
    FileHandle, RegistrationPayload, SignatureCapability, SignaturePayload, SubmissionError,
    SubmissionReceipt, SubmissionSink, UploadCapability,
};
use std::sync::Mutex;

/// Sink that keeps accepted registrations in memory and numbers them.
#[derive(Default)]
pub(crate) struct InMemorySubmissionSink {
    payloads: Mutex<Vec<RegistrationPayload>>,
}

impl SubmissionSink for InMemorySubmissionSink {
    fn deliver(
        &self,
        payload: &RegistrationPayload,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let mut guard = self
            .payloads
            .lock()
            .map_err(|_| SubmissionError::Transport("submission store poisoned".to_string()))?;
        guard.push(payload.clone());

        Ok(SubmissionReceipt {
            reference: format!("REG-{:06}", guard.len()),
            submitted_at,
        })
    }
}

impl InMemorySubmissionSink {
    pub(crate) fn latest(&self) -> Option<RegistrationPayload> {
        self.payloads
            .lock()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.payloads.lock().expect("sink mutex poisoned").len()
    }
}

/// Upload widget stand-in that returns a fixed selection.
pub(crate) struct PresetUploads(pub(crate) Vec<FileHandle>);

impl UploadCapability for PresetUploads {
    fn select_files(&mut self) -> Vec<FileHandle> {
        self.0.clone()
    }
}

/// Signature pad stand-in that returns a fixed payload.
pub(crate) struct PresetSignaturePad(pub(crate) String);

impl SignatureCapability for PresetSignaturePad {
    fn capture(&mut self) -> SignaturePayload {
        SignaturePayload(self.0.clone())
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
