//! RegistrationWizard: drives the state machine and reports to a renderer.

use tracing::{debug, info};

use crate::account::Role;
use crate::error::RegistrationError;

use super::fields::{RequiredFields, required_fields_for};
use super::form::FormSnapshot;
use super::state::{StepTransition, WizardState, WizardStep};
use super::validate::{TERMS_KEY, ValidationErrors, messages};

/// What the UI shows after a role is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSection {
    pub role: Role,
    /// Required markers for the visible section only.
    pub required: RequiredFields,
    /// Entrepreneurs get the diagnostic questionnaire, everyone else a welcome note.
    pub shows_diagnostic: bool,
}

/// UI collaborator that receives the wizard's output.
pub trait WizardRenderer {
    /// Show messages next to the keyed fields and groups.
    fn show_errors(&mut self, errors: &ValidationErrors);

    /// Remove all visible messages.
    fn clear_errors(&mut self);

    /// Reveal one role section and hide the others.
    fn show_role_section(&mut self, section: &RoleSection);

    /// Activate a step and update the progress bar.
    fn show_step(&mut self, transition: &StepTransition);
}

/// Key messages by field/group so the renderer can place them.
pub fn keyed_errors(err: &RegistrationError) -> ValidationErrors {
    match err {
        RegistrationError::Validation(errors) => errors.clone(),
        RegistrationError::RoleNotSelected => ValidationErrors::single("role", messages::SELECT_ROLE),
        RegistrationError::TermsNotAccepted => {
            ValidationErrors::single(TERMS_KEY, messages::ACCEPT_TERMS)
        }
        other => ValidationErrors::single("form", other.to_string()),
    }
}

/// The registration wizard with its renderer attached.
pub struct RegistrationWizard<R: WizardRenderer> {
    state: WizardState,
    renderer: R,
}

impl<R: WizardRenderer> RegistrationWizard<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            state: WizardState::default(),
            renderer,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Select a role: updates the form and tells the renderer which section to show.
    pub fn select_role(&mut self, form: &mut FormSnapshot, role: Role) {
        form.select_role(role);
        let section = RoleSection {
            role,
            required: required_fields_for(role),
            shows_diagnostic: role == Role::Entrepreneur,
        };
        debug!(role = %role, "Role selected");
        self.renderer.clear_errors();
        self.renderer.show_role_section(&section);
    }

    /// Try to move forward. Returns `true` if the step changed.
    pub fn next(&mut self, target: WizardStep, form: &FormSnapshot) -> bool {
        match self.state.advance(target, form) {
            Ok(transition) => {
                debug!(step = %target, "Wizard advanced");
                self.renderer.clear_errors();
                self.renderer.show_step(&transition);
                true
            }
            Err(e) => {
                self.renderer.show_errors(&keyed_errors(&e));
                false
            }
        }
    }

    /// Go back to an earlier step. Returns `true` if the step changed.
    pub fn back(&mut self, target: WizardStep) -> bool {
        match self.state.retreat(target) {
            Ok(transition) => {
                self.renderer.show_step(&transition);
                true
            }
            Err(e) => {
                debug!(error = %e, "Ignoring backward move");
                false
            }
        }
    }

    /// Final gate before the account is created.
    pub fn submit(&mut self, form: &FormSnapshot) -> Result<(), RegistrationError> {
        if let Err(e) = self.state.submit(form) {
            self.renderer.show_errors(&keyed_errors(&e));
            return Err(e);
        }
        info!(role = ?form.role(), "Registration form submitted");
        self.renderer.clear_errors();
        Ok(())
    }
}
