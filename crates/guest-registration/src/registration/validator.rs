use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::domain::{
    FileHandle, FormAggregate, GuestField, GuestRecord, Nationality, RegistrationPayload,
    ValidatedGuest,
};
use crate::config::FormConfig;

/// Minimum number of characters in a trimmed full name.
pub const MIN_NAME_LENGTH: usize = 2;

/// Address of a form control, rendered as `guests.<index>.<attribute>` for guest fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    NumberOfGuests,
    Guest { index: usize, field: GuestField },
    Identification,
    MarriageCertificate,
    TermsAccepted,
    Signature,
}

impl FieldPath {
    pub const fn guest(index: usize, field: GuestField) -> Self {
        Self::Guest { index, field }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::NumberOfGuests => f.write_str("numberOfGuests"),
            FieldPath::Guest { index, field } => write!(f, "guests.{}.{}", index, field.as_str()),
            FieldPath::Identification => f.write_str("identification"),
            FieldPath::MarriageCertificate => f.write_str("marriageCertificate"),
            FieldPath::TermsAccepted => f.write_str("termsAccepted"),
            FieldPath::Signature => f.write_str("signature"),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Violated field rule, displayed as the message shown next to the control.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("please select the number of guests")]
    NumberOfGuestsRequired,
    #[error("{expected} guest(s) selected but {found} guest record(s) provided")]
    GuestCountMismatch { expected: usize, found: usize },
    #[error("full name must be at least {min} characters")]
    NameTooShort { min: usize },
    #[error("please select a sex")]
    SexRequired,
    #[error("please select a nationality")]
    NationalityRequired,
    #[error("at least one identification document is required")]
    IdentificationRequired,
    #[error("a marriage certificate is required for this group of guests")]
    MarriageCertificateRequired,
    #[error("file '{name}' exceeds the {limit_bytes} byte limit")]
    FileTooLarge { name: String, limit_bytes: u64 },
    #[error("you must accept the terms and conditions")]
    TermsNotAccepted,
    #[error("please provide your signature")]
    SignatureRequired,
}

impl FieldError {
    pub const fn category(&self) -> &'static str {
        match self {
            FieldError::NumberOfGuestsRequired
            | FieldError::SexRequired
            | FieldError::NationalityRequired => "selection_required",
            FieldError::GuestCountMismatch { .. } => "count_mismatch",
            FieldError::NameTooShort { .. } => "too_short",
            FieldError::IdentificationRequired => "file_required",
            FieldError::MarriageCertificateRequired => "required_when_flagged",
            FieldError::FileTooLarge { .. } => "file_too_large",
            FieldError::TermsNotAccepted => "must_accept",
            FieldError::SignatureRequired => "signature_required",
        }
    }
}

/// Every failing field of one validation pass, keyed by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<FieldPath, FieldError>,
}

impl ValidationErrors {
    fn insert(&mut self, path: FieldPath, error: FieldError) {
        self.fields.entry(path).or_insert(error);
    }

    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.fields.get(path)
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.fields.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldError)> {
        self.fields.iter()
    }

    pub fn paths(&self) -> Vec<FieldPath> {
        self.fields.keys().copied().collect()
    }

    /// Field path to message map for the presentation layer.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(path, error)| (path.to_string(), error.to_string()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths = self
            .fields
            .keys()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        write!(f, "invalid fields: {}", paths.join(", "))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.fields
                .iter()
                .map(|(path, error)| (path, error.to_string())),
        )
    }
}

/// Checks a complete aggregate and produces the payload handed to the sink.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    config: FormConfig,
}

impl FormValidator {
    pub fn new(config: FormConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Validate every rule and report all failures at once. The marriage
    /// certificate is only checked when `requires_marriage_certificate` is set.
    pub fn validate(
        &self,
        aggregate: &FormAggregate,
        requires_marriage_certificate: bool,
    ) -> Result<RegistrationPayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if !(1..=self.config.max_guests).contains(&aggregate.number_of_guests) {
            errors.insert(FieldPath::NumberOfGuests, FieldError::NumberOfGuestsRequired);
        } else if aggregate.guests.len() != aggregate.guest_count() {
            errors.insert(
                FieldPath::NumberOfGuests,
                FieldError::GuestCountMismatch {
                    expected: aggregate.guest_count(),
                    found: aggregate.guests.len(),
                },
            );
        }

        let guests = aggregate
            .guests
            .iter()
            .enumerate()
            .filter_map(|(index, guest)| validate_guest(index, guest, &mut errors))
            .collect::<Vec<_>>();

        self.check_files(
            FieldPath::Identification,
            &aggregate.identification,
            FieldError::IdentificationRequired,
            &mut errors,
        );

        if requires_marriage_certificate {
            self.check_files(
                FieldPath::MarriageCertificate,
                &aggregate.marriage_certificate,
                FieldError::MarriageCertificateRequired,
                &mut errors,
            );
        }

        if aggregate.terms_accepted.is_none() {
            errors.insert(FieldPath::TermsAccepted, FieldError::TermsNotAccepted);
        }

        if aggregate.signature.is_blank() {
            errors.insert(FieldPath::Signature, FieldError::SignatureRequired);
        }

        match aggregate.terms_accepted {
            Some(terms_accepted) if errors.is_empty() => Ok(RegistrationPayload {
                number_of_guests: aggregate.number_of_guests,
                guests,
                identification: aggregate.identification.clone(),
                marriage_certificate: aggregate.marriage_certificate.clone(),
                marriage_certificate_required: requires_marriage_certificate,
                terms_accepted,
                signature: aggregate.signature.clone(),
            }),
            _ => Err(errors),
        }
    }

    fn check_files(
        &self,
        path: FieldPath,
        files: &[FileHandle],
        missing: FieldError,
        errors: &mut ValidationErrors,
    ) {
        if files.is_empty() {
            errors.insert(path, missing);
            return;
        }

        if !self.config.enforce_upload_ceiling {
            return;
        }

        let limit_bytes = self.config.max_upload_bytes;
        if let Some(oversized) = files.iter().find(|file| file.size_bytes > limit_bytes) {
            errors.insert(
                path,
                FieldError::FileTooLarge {
                    name: oversized.name.clone(),
                    limit_bytes,
                },
            );
        }
    }
}

fn validate_guest(
    index: usize,
    guest: &GuestRecord,
    errors: &mut ValidationErrors,
) -> Option<ValidatedGuest> {
    let full_name = guest.full_name.trim();
    let name_ok = full_name.chars().count() >= MIN_NAME_LENGTH;
    if !name_ok {
        errors.insert(
            FieldPath::guest(index, GuestField::FullName),
            FieldError::NameTooShort {
                min: MIN_NAME_LENGTH,
            },
        );
    }

    if guest.sex.is_none() {
        errors.insert(
            FieldPath::guest(index, GuestField::Sex),
            FieldError::SexRequired,
        );
    }

    let nationality = Nationality::from_catalog(&guest.nationality);
    if nationality.is_none() {
        errors.insert(
            FieldPath::guest(index, GuestField::Nationality),
            FieldError::NationalityRequired,
        );
    }

    match (name_ok, guest.sex, nationality) {
        (true, Some(sex), Some(nationality)) => Some(ValidatedGuest {
            full_name: full_name.to_string(),
            sex,
            nationality,
        }),
        _ => None,
    }
}
