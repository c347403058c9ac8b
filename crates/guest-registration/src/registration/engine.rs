use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::capabilities::{
    SignatureCapability, SubmissionError, SubmissionReceipt, SubmissionSink, UploadCapability,
};
use super::domain::{
    FileHandle, FormAggregate, FormState, GuestField, Sex, SignaturePayload, TermsAcceptance,
};
use super::policy::requires_marriage_certificate;
use super::synchronizer::GuestListSynchronizer;
use super::validator::{FormValidator, ValidationErrors};
use crate::config::FormConfig;

/// Discrete user input applied to a form session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// Raw value of the guest-count selector.
    GuestCountChanged { value: String },
    GuestFieldChanged {
        index: usize,
        field: GuestField,
        value: String,
    },
    IdentificationSelected { files: Vec<FileHandle> },
    MarriageCertificateSelected { files: Vec<FileHandle> },
    TermsChanged { value: String },
    SignatureCaptured { signature: SignaturePayload },
}

impl FormEvent {
    /// Event tag without the field values, safe to log.
    pub const fn kind(&self) -> &'static str {
        match self {
            FormEvent::GuestCountChanged { .. } => "guest_count_changed",
            FormEvent::GuestFieldChanged { .. } => "guest_field_changed",
            FormEvent::IdentificationSelected { .. } => "identification_selected",
            FormEvent::MarriageCertificateSelected { .. } => "marriage_certificate_selected",
            FormEvent::TermsChanged { .. } => "terms_changed",
            FormEvent::SignatureCaptured { .. } => "signature_captured",
        }
    }
}

/// Reactive core of one registration session.
pub struct FormStateEngine<S> {
    aggregate: FormAggregate,
    requires_marriage_certificate: bool,
    state: FormState,
    last_errors: Option<ValidationErrors>,
    synchronizer: GuestListSynchronizer,
    validator: FormValidator,
    sink: Arc<S>,
}

impl<S> FormStateEngine<S>
where
    S: SubmissionSink,
{
    pub fn new(sink: Arc<S>, config: FormConfig) -> Self {
        let aggregate = FormAggregate::default();
        let requires_marriage_certificate = requires_marriage_certificate(&aggregate.guests);

        Self {
            aggregate,
            requires_marriage_certificate,
            state: FormState::Editing,
            last_errors: None,
            synchronizer: GuestListSynchronizer::from_config(&config),
            validator: FormValidator::new(config),
            sink,
        }
    }

    pub fn aggregate(&self) -> &FormAggregate {
        &self.aggregate
    }

    pub fn requires_marriage_certificate(&self) -> bool {
        self.requires_marriage_certificate
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Errors from the most recent rejected submit, cleared by an accepted one.
    pub fn last_errors(&self) -> Option<&ValidationErrors> {
        self.last_errors.as_ref()
    }

    /// Apply one field change. Guest-count and guest-field changes resynchronize
    /// the guest list and recompute the marriage-certificate flag before returning.
    pub fn apply(&mut self, event: FormEvent) -> Result<(), EngineError> {
        if self.state == FormState::Submitted {
            warn!(event = event.kind(), "form event received after submission");
            return Err(EngineError::SessionClosed);
        }

        match event {
            FormEvent::GuestCountChanged { value } => {
                let target = self.synchronizer.parse_target(&value);
                match target {
                    Some(count) => self.aggregate.number_of_guests = count,
                    None => debug!(%value, "ignoring unusable guest count"),
                }
                self.reconcile_guests(target);
            }
            FormEvent::GuestFieldChanged {
                index,
                field,
                value,
            } => {
                let len = self.aggregate.guests.len();
                let guest = self
                    .aggregate
                    .guests
                    .get_mut(index)
                    .ok_or(EngineError::GuestIndexOutOfRange { index, len })?;

                match field {
                    GuestField::FullName => guest.full_name = value,
                    GuestField::Sex => guest.sex = Sex::from_input(&value),
                    GuestField::Nationality => guest.nationality = value,
                }
                self.reconcile_guests(Some(self.aggregate.number_of_guests));
            }
            FormEvent::IdentificationSelected { files } => self.aggregate.identification = files,
            FormEvent::MarriageCertificateSelected { files } => {
                self.aggregate.marriage_certificate = files
            }
            FormEvent::TermsChanged { value } => {
                self.aggregate.terms_accepted = TermsAcceptance::from_input(&value)
            }
            FormEvent::SignatureCaptured { signature } => self.aggregate.signature = signature,
        }

        Ok(())
    }

    pub fn upload_identification<U>(&mut self, uploads: &mut U) -> Result<(), EngineError>
    where
        U: UploadCapability + ?Sized,
    {
        let files = uploads.select_files();
        self.apply(FormEvent::IdentificationSelected { files })
    }

    pub fn upload_marriage_certificate<U>(&mut self, uploads: &mut U) -> Result<(), EngineError>
    where
        U: UploadCapability + ?Sized,
    {
        let files = uploads.select_files();
        self.apply(FormEvent::MarriageCertificateSelected { files })
    }

    pub fn capture_signature<C>(&mut self, pad: &mut C) -> Result<(), EngineError>
    where
        C: SignatureCapability + ?Sized,
    {
        let signature = pad.capture();
        self.apply(FormEvent::SignatureCaptured { signature })
    }

    /// Validate the aggregate and, when it passes, hand the payload to the sink.
    ///
    /// The session only becomes `Submitted` once the sink accepts the payload.
    pub fn submit(
        &mut self,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmitError> {
        if self.state == FormState::Submitted {
            return Err(SubmitError::SessionClosed);
        }

        let payload = match self
            .validator
            .validate(&self.aggregate, self.requires_marriage_certificate)
        {
            Ok(payload) => payload,
            Err(errors) => {
                info!(invalid_fields = errors.len(), "registration rejected");
                self.last_errors = Some(errors.clone());
                return Err(SubmitError::Invalid(errors));
            }
        };
        self.last_errors = None;

        let receipt = self
            .sink
            .deliver(&payload, submitted_at)
            .inspect_err(|err| warn!(error = %err, "registration delivery failed"))?;

        self.state = FormState::Submitted;
        info!(
            reference = %receipt.reference,
            guests = payload.guests.len(),
            marriage_certificate_required = payload.marriage_certificate_required,
            "registration submitted"
        );

        Ok(receipt)
    }

    fn reconcile_guests(&mut self, target: Option<u8>) {
        let guests = std::mem::take(&mut self.aggregate.guests);
        self.aggregate.guests = self.synchronizer.synchronize(guests, target);
        debug_assert_eq!(
            self.aggregate.guests.len(),
            self.aggregate.guest_count(),
            "guest list diverged from the selected guest count"
        );

        let required = requires_marriage_certificate(&self.aggregate.guests);
        if required != self.requires_marriage_certificate {
            debug!(required, "marriage certificate requirement changed");
        }
        self.requires_marriage_certificate = required;
    }
}

/// Rejected form event.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("registration already submitted")]
    SessionClosed,
    #[error("guest {index} does not exist (form has {len} guest(s))")]
    GuestIndexOutOfRange { index: usize, len: usize },
}

/// Error raised by a submit attempt.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("registration form is incomplete ({0})")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Sink(#[from] SubmissionError),
    #[error("registration already submitted")]
    SessionClosed,
}
