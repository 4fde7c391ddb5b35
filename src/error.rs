//! Error types for SUMAK.

use uuid::Uuid;

use crate::wizard::{ValidationErrors, WizardStep};

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Task error: {0}")]
    Task(#[from] TaskError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Account store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("this email is already registered")]
    DuplicateEmail { email: String },

    #[error("Account not found: {id}")]
    NotFound { id: Uuid },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while walking the registration wizard or creating the account.
///
/// Everything here is recoverable: the user corrects the form and retries.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("please select an account type")]
    RoleNotSelected,

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("you must accept the terms and conditions")]
    TermsNotAccepted,

    #[error("this email is already registered")]
    DuplicateEmail { email: String },

    #[error("invalid account role: {0}")]
    InvalidRole(String),

    #[error("cannot move from step {from} to step {to}")]
    InvalidTransition { from: WizardStep, to: WizardStep },

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for RegistrationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail { email } => Self::DuplicateEmail { email },
            other => Self::Store(other),
        }
    }
}

/// Login and password recovery errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("no account found with this email")]
    UnknownEmail,

    #[error("recovery code is invalid or expired")]
    InvalidRecoveryCode,

    #[error("{0}")]
    InvalidPassword(&'static str),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Task list errors.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Task {0} not found")]
    NotFound(u32),

    #[error("Task {0} already completed")]
    AlreadyCompleted(u32),

    #[error("Account {0} has no task list")]
    NotEntrepreneur(Uuid),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
