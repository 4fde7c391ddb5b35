//! Registration wizard state machine: which step is active and whether it may move.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RegistrationError;

use super::fields::{Field, RadioGroup, RequiredFields};
use super::form::FormSnapshot;
use super::validate::{ValidationErrors, messages, validate_field};

/// The four registration steps.
///
/// Forward: Role → Account → Profile → Diagnostic, one at a time.
/// Backward: to any earlier step.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Role,
    Account,
    Profile,
    Diagnostic,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Role,
        WizardStep::Account,
        WizardStep::Profile,
        WizardStep::Diagnostic,
    ];

    /// 1-based step number as shown in the progress bar.
    pub fn number(&self) -> u8 {
        match self {
            Self::Role => 1,
            Self::Account => 2,
            Self::Profile => 3,
            Self::Diagnostic => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Progress bar marker for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMarker {
    Completed,
    Active,
    Unmarked,
}

/// What the UI must show after a successful move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTransition {
    pub active: WizardStep,
    pub markers: Vec<(WizardStep, StepMarker)>,
}

impl StepTransition {
    /// Steps strictly before `target` are completed, `target` is active,
    /// later steps are unmarked.
    pub fn to(target: WizardStep) -> Self {
        let markers = WizardStep::ALL
            .into_iter()
            .map(|step| {
                let marker = if step < target {
                    StepMarker::Completed
                } else if step == target {
                    StepMarker::Active
                } else {
                    StepMarker::Unmarked
                };
                (step, marker)
            })
            .collect();
        Self {
            active: target,
            markers,
        }
    }

    pub fn marker(&self, step: WizardStep) -> StepMarker {
        self.markers
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, m)| *m)
            .unwrap_or(StepMarker::Unmarked)
    }
}

/// Check whether the form allows leaving `step` forwards.
///
/// Step 1 only needs a role. Later steps validate every visible, enabled,
/// required field on the step and require a checked option in every
/// required radio group of the visible role section.
pub fn check_step(step: WizardStep, form: &FormSnapshot) -> Result<(), RegistrationError> {
    if step == WizardStep::Role {
        return match form.checked(RadioGroup::Role) {
            Some(_) => Ok(()),
            None => Err(RegistrationError::RoleNotSelected),
        };
    }

    let required = RequiredFields::for_form(form.role());
    let mut errors = ValidationErrors::default();

    for field in Field::ALL.into_iter().filter(|f| f.step() == step) {
        if !required.requires_field(field)
            || !form.is_field_visible(field)
            || form.is_disabled(field)
        {
            continue;
        }
        if let Err(message) = validate_field(field, form.value(field)) {
            errors.push(field.name(), message);
        }
    }

    for group in RadioGroup::ALL.into_iter().filter(|g| g.step() == step) {
        if required.requires_group(group)
            && form.is_group_visible(group)
            && form.checked(group).is_none()
        {
            errors.push(group.name(), messages::SELECT_OPTION);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(step = %step, failed = ?errors.keys(), "Step validation failed");
        Err(RegistrationError::Validation(errors))
    }
}

/// Boolean form of [`check_step`].
pub fn can_advance(step: WizardStep, form: &FormSnapshot) -> bool {
    check_step(step, form).is_ok()
}

/// The wizard's cursor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardState {
    pub current: WizardStep,
}

impl WizardState {
    /// Move forward to `target`, which must be the step right after the current one.
    pub fn advance(
        &mut self,
        target: WizardStep,
        form: &FormSnapshot,
    ) -> Result<StepTransition, RegistrationError> {
        if self.current.next() != Some(target) {
            return Err(RegistrationError::InvalidTransition {
                from: self.current,
                to: target,
            });
        }
        check_step(self.current, form)?;
        self.current = target;
        Ok(StepTransition::to(target))
    }

    /// Move back to any earlier step. No validation.
    pub fn retreat(&mut self, target: WizardStep) -> Result<StepTransition, RegistrationError> {
        if target >= self.current {
            return Err(RegistrationError::InvalidTransition {
                from: self.current,
                to: target,
            });
        }
        self.current = target;
        Ok(StepTransition::to(target))
    }

    /// Final gate: the last step validates, then the terms must be accepted.
    pub fn submit(&self, form: &FormSnapshot) -> Result<(), RegistrationError> {
        if !self.current.is_last() {
            let last = WizardStep::ALL[WizardStep::ALL.len() - 1];
            return Err(RegistrationError::InvalidTransition {
                from: self.current,
                to: last,
            });
        }
        validate_submission(form)
    }
}

/// Every step's checks, then the terms gate. Account creation runs this
/// whether or not the form came through the wizard.
pub fn validate_submission(form: &FormSnapshot) -> Result<(), RegistrationError> {
    for step in WizardStep::ALL {
        check_step(step, form)?;
    }
    if !form.terms_accepted {
        return Err(RegistrationError::TermsNotAccepted);
    }
    Ok(())
}
