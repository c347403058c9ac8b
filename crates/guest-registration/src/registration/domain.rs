use serde::{Deserialize, Serialize};

/// Sex as captured by the guest's identity document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse the raw value of the sex selector. Anything outside the
    /// enumeration (including a cleared selection) yields `None`.
    pub fn from_input(value: &str) -> Option<Self> {
        match value.trim() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

/// Fixed nationality catalog offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nationality {
    Moroccan,
    French,
    American,
    Other,
}

impl Nationality {
    pub const fn catalog() -> [Self; 4] {
        [Self::Moroccan, Self::French, Self::American, Self::Other]
    }

    /// Catalog value exactly as stored on a guest record.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moroccan => "Moroccan",
            Self::French => "French",
            Self::American => "American",
            Self::Other => "Other",
        }
    }

    /// Exact-match lookup; no trimming or case folding.
    pub fn from_catalog(value: &str) -> Option<Self> {
        Self::catalog()
            .into_iter()
            .find(|nationality| nationality.as_str() == value)
    }
}

/// One registrant's identity attributes while the form is being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub full_name: String,
    pub sex: Option<Sex>,
    /// Raw selector value; only catalog strings pass validation.
    pub nationality: String,
}

impl GuestRecord {
    /// Record appended when the guest count grows.
    pub fn placeholder() -> Self {
        Self {
            full_name: String::new(),
            sex: Some(Sex::Male),
            nationality: String::new(),
        }
    }

    pub fn new(full_name: impl Into<String>, sex: Sex, nationality: Nationality) -> Self {
        Self {
            full_name: full_name.into(),
            sex: Some(sex),
            nationality: nationality.as_str().to_string(),
        }
    }

    pub fn is_moroccan(&self) -> bool {
        self.nationality == Nationality::Moroccan.as_str()
    }
}

impl Default for GuestRecord {
    fn default() -> Self {
        Self::placeholder()
    }
}

/// Editable attribute of a guest record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GuestField {
    FullName,
    Sex,
    Nationality,
}

impl GuestField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Sex => "sex",
            Self::Nationality => "nationality",
        }
    }
}

/// Opaque handle returned by the upload capability. The content is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    pub name: String,
    pub size_bytes: u64,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }
}

/// Opaque payload returned by the signature capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignaturePayload(pub String);

impl SignaturePayload {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// The only valid value of the terms control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermsAcceptance {
    Accepted,
}

impl TermsAcceptance {
    pub fn from_input(value: &str) -> Option<Self> {
        match value.trim() {
            "accepted" => Some(Self::Accepted),
            _ => None,
        }
    }
}

/// Every value of one registration form session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAggregate {
    /// Last stable guest count; transient invalid input never lands here.
    pub number_of_guests: u8,
    pub guests: Vec<GuestRecord>,
    pub identification: Vec<FileHandle>,
    #[serde(default)]
    pub marriage_certificate: Vec<FileHandle>,
    pub terms_accepted: Option<TermsAcceptance>,
    pub signature: SignaturePayload,
}

impl FormAggregate {
    pub fn guest_count(&self) -> usize {
        usize::from(self.number_of_guests)
    }
}

impl Default for FormAggregate {
    fn default() -> Self {
        Self {
            number_of_guests: 1,
            guests: vec![GuestRecord::placeholder()],
            identification: Vec::new(),
            marriage_certificate: Vec::new(),
            terms_accepted: None,
            signature: SignaturePayload::default(),
        }
    }
}

/// Guest identity after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedGuest {
    pub full_name: String,
    pub sex: Sex,
    pub nationality: Nationality,
}

/// Validated form handed to the submission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub number_of_guests: u8,
    pub guests: Vec<ValidatedGuest>,
    pub identification: Vec<FileHandle>,
    pub marriage_certificate: Vec<FileHandle>,
    pub marriage_certificate_required: bool,
    pub terms_accepted: TermsAcceptance,
    pub signature: SignaturePayload,
}

/// Lifecycle of a form session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    Editing,
    Submitted,
}

impl FormState {
    pub const fn label(self) -> &'static str {
        match self {
            FormState::Editing => "editing",
            FormState::Submitted => "submitted",
        }
    }
}
