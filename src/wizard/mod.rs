//! Registration wizard: the four-step sign-up form and its gating rules.
//!
//! Step 1 picks a role, step 2 collects account details, step 3 the role's
//! own profile section, step 4 the diagnostic (entrepreneurs) and the terms.
//! The required field set is a pure function of the selected role.

pub mod fields;
pub mod flow;
pub mod form;
pub mod state;
pub mod validate;

pub use fields::{ACCOUNT_FIELDS, Field, RadioGroup, RequiredFields, required_fields_for};
pub use flow::{RegistrationWizard, RoleSection, WizardRenderer, keyed_errors};
pub use form::FormSnapshot;
pub use state::{
    StepMarker, StepTransition, WizardState, WizardStep, can_advance, check_step,
    validate_submission,
};
pub use validate::{FieldError, FieldKind, ValidationErrors, validate, validate_field};
