//! Field validators: stateless predicates over raw form input.

use std::sync::LazyLock;

use regex::Regex;

use super::fields::Field;

/// Validation messages shown next to the offending input.
pub mod messages {
    pub const EMAIL: &str = "enter a valid email address";
    pub const PHONE: &str = "enter a valid phone (9 digits)";
    pub const PASSWORD: &str = "password must be at least 6 characters";
    pub const NAME: &str = "this field must be at least 2 characters";
    pub const REQUIRED: &str = "this field is required";
    pub const SELECT_ROLE: &str = "please select an account type";
    pub const SELECT_OPTION: &str = "please select an option";
    pub const ACCEPT_TERMS: &str = "you must accept the terms and conditions";
}

/// Key under which the terms checkbox error is reported.
pub const TERMS_KEY: &str = "terms";

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum trimmed length for name-class fields.
pub const MIN_NAME_LEN: usize = 2;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Local numbering: nine digits, mobile numbers start with 9.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^9[0-9]{8}$").unwrap());

/// Which validator applies to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Phone,
    Password,
    NameLike,
    Required,
}

/// Validate a raw value. `Err` carries the message to show.
pub fn validate(kind: FieldKind, raw: &str) -> Result<(), &'static str> {
    let valid = match kind {
        FieldKind::Email => EMAIL_RE.is_match(raw),
        FieldKind::Phone => {
            let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            PHONE_RE.is_match(&digits)
        }
        FieldKind::Password => raw.chars().count() >= MIN_PASSWORD_LEN,
        FieldKind::NameLike => raw.trim().chars().count() >= MIN_NAME_LEN,
        FieldKind::Required => !raw.trim().is_empty(),
    };
    if valid { Ok(()) } else { Err(kind.message()) }
}

/// Validate a form field with the validator for its kind.
pub fn validate_field(field: Field, raw: &str) -> Result<(), &'static str> {
    validate(field.kind(), raw)
}

impl FieldKind {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Email => messages::EMAIL,
            Self::Phone => messages::PHONE,
            Self::Password => messages::PASSWORD,
            Self::NameLike => messages::NAME,
            Self::Required => messages::REQUIRED,
        }
    }
}

/// A message keyed by field or radio group name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub key: String,
    pub message: String,
}

/// All validation failures for one attempted transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(key: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(key, message);
        errors
    }

    pub fn push(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            key: key.into(),
            message: message.into(),
        });
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.message.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.key, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
