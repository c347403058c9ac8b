use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{FileHandle, RegistrationPayload, SignaturePayload};

/// File picker / drop zone. Returns the selected handles in selection order.
pub trait UploadCapability {
    fn select_files(&mut self) -> Vec<FileHandle>;
}

/// Signature pad. Returns whatever the pad produced; the engine never looks inside.
pub trait SignatureCapability {
    fn capture(&mut self) -> SignaturePayload;
}

/// Receives the validated payload once a submission is accepted.
pub trait SubmissionSink: Send + Sync {
    fn deliver(
        &self,
        payload: &RegistrationPayload,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

/// Acknowledgement returned by the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub reference: String,
    pub submitted_at: DateTime<Utc>,
}

/// Sink delivery error.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission transport unavailable: {0}")]
    Transport(String),
    #[error("submission rejected: {0}")]
    Rejected(String),
}
