//! Guest registration form-state engine.
//!
//! Field changes enter [`FormStateEngine::apply`] as [`FormEvent`]s. Guest-count
//! and guest-field changes run the [`GuestListSynchronizer`] and then the
//! marriage-certificate policy before control returns; [`FormStateEngine::submit`]
//! runs the [`FormValidator`] over the whole aggregate and hands the typed
//! payload to a [`SubmissionSink`].

pub mod capabilities;
pub mod domain;
pub mod engine;
pub mod policy;
pub mod synchronizer;
pub mod validator;

#[cfg(test)]
mod tests;

pub use capabilities::{
    SignatureCapability, SubmissionError, SubmissionReceipt, SubmissionSink, UploadCapability,
};
pub use domain::{
    FileHandle, FormAggregate, FormState, GuestField, GuestRecord, Nationality,
    RegistrationPayload, Sex, SignaturePayload, TermsAcceptance, ValidatedGuest,
};
pub use engine::{EngineError, FormEvent, FormStateEngine, SubmitError};
pub use policy::{requires_marriage_certificate, GuestCompositionSignals};
pub use synchronizer::GuestListSynchronizer;
pub use validator::{FieldError, FieldPath, FormValidator, ValidationErrors, MIN_NAME_LENGTH};
