//! End-to-end registration: wizard → account service → store → dashboard.

use std::sync::Arc;

use sumak::account::Role;
use sumak::auth::AccountService;
use sumak::config::{LatencyConfig, SumakConfig};
use sumak::dashboard::EntrepreneurDashboard;
use sumak::error::RegistrationError;
use sumak::store::{AccountStore, FileStore, MemoryStore};
use sumak::tasks::TaskCategory;
use sumak::wizard::{
    Field, FormSnapshot, RadioGroup, RegistrationWizard, RoleSection, StepTransition,
    ValidationErrors, WizardRenderer, WizardStep,
};

/// Renderer that keeps the last errors and counts transitions.
#[derive(Default)]
struct TestRenderer {
    last_errors: Option<ValidationErrors>,
    transitions: usize,
}

impl WizardRenderer for TestRenderer {
    fn show_errors(&mut self, errors: &ValidationErrors) {
        self.last_errors = Some(errors.clone());
    }
    fn clear_errors(&mut self) {
        self.last_errors = None;
    }
    fn show_role_section(&mut self, _section: &RoleSection) {}
    fn show_step(&mut self, _transition: &StepTransition) {
        self.transitions += 1;
    }
}

fn config() -> SumakConfig {
    SumakConfig {
        latency: LatencyConfig::none(),
        ..Default::default()
    }
}

/// Fill the form the way a user would, step by step.
fn walk_entrepreneur(wizard: &mut RegistrationWizard<TestRenderer>, form: &mut FormSnapshot) {
    assert!(!wizard.next(WizardStep::Account, form));
    wizard.select_role(form, Role::Entrepreneur);
    assert!(wizard.next(WizardStep::Account, form));

    form.set(Field::Name, "Ana Quispe");
    form.set(Field::Email, "ana@sumak.pe");
    form.set(Field::Phone, "98 765 4321");
    form.set(Field::Password, "quinua1");
    assert!(wizard.next(WizardStep::Profile, form));

    form.set(Field::BusinessName, "Bodega La Esquina");
    form.set(Field::BusinessSector, "retail");
    assert!(!wizard.next(WizardStep::Diagnostic, form));
    form.check(RadioGroup::Goal, "ventas");
    form.check(RadioGroup::Connectivity, "medium");
    assert!(wizard.next(WizardStep::Diagnostic, form));

    form.check(RadioGroup::Q1, "no");
    form.check(RadioGroup::Q2, "yes");
    form.check(RadioGroup::Q3, "yes");
    form.check(RadioGroup::Q4, "yes");
    form.check(RadioGroup::Q5, "yes");
}

#[tokio::test]
async fn entrepreneur_signs_up_and_gets_a_path() {
    let service = AccountService::new(Arc::new(MemoryStore::new()), config());
    let mut wizard = RegistrationWizard::new(TestRenderer::default());
    let mut form = FormSnapshot::default();

    walk_entrepreneur(&mut wizard, &mut form);
    form.terms_accepted = true;
    wizard.submit(&form).unwrap();
    assert_eq!(wizard.renderer().transitions, 3);

    let account = service.register(&form).await.unwrap();
    let path = &account.entrepreneur().unwrap().personalized_path;
    assert_eq!(path.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(path[0].category, TaskCategory::Introduction);
    assert_eq!(path[1].category, TaskCategory::Finance);
    assert_eq!(path[2].title, "Create an effective promotion");

    service.complete_task(account.id, 1).await.unwrap();
    let stored = service.store().get(account.id).await.unwrap().unwrap();
    let dash = EntrepreneurDashboard::for_account(&stored).unwrap();
    assert_eq!(dash.progress, 33);
    assert_eq!(dash.initials, "AQ");

    let session = service.login("ana@sumak.pe", "quinua1", false).await.unwrap();
    assert_eq!(session.role, Role::Entrepreneur);
}

#[tokio::test]
async fn unchecked_terms_block_account_creation() {
    let store = Arc::new(MemoryStore::new());
    let service = AccountService::new(store.clone(), config());
    let mut wizard = RegistrationWizard::new(TestRenderer::default());
    let mut form = FormSnapshot::default();

    walk_entrepreneur(&mut wizard, &mut form);
    let err = wizard.submit(&form).unwrap_err();
    assert!(matches!(err, RegistrationError::TermsNotAccepted));
    let errors = wizard.renderer().last_errors.clone().unwrap();
    assert_eq!(errors.keys(), vec!["terms"]);

    // calling the service directly hits the same gate
    let err = service.register(&form).await.unwrap_err();
    assert!(matches!(err, RegistrationError::TermsNotAccepted));
    assert!(store.list_all().await.unwrap().is_empty());

    form.terms_accepted = true;
    service.register(&form).await.unwrap();
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn service_rejects_a_form_that_skipped_the_wizard() {
    let store = Arc::new(MemoryStore::new());
    let service = AccountService::new(store.clone(), config());

    let mut form = FormSnapshot::default();
    form.select_role(Role::Entrepreneur);
    form.set(Field::Email, "not-an-email");

    match service.register(&form).await {
        Err(RegistrationError::Validation(errors)) => {
            assert_eq!(errors.keys(), vec!["name", "email", "phone", "password"]);
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn second_signup_with_same_email_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::open(tmp.path().join("accounts.json")).await.unwrap());
    let service = AccountService::new(store.clone(), config());

    let mut form = FormSnapshot::default();
    form.select_role(Role::Client);
    form.set(Field::Name, "Luis Mamani");
    form.set(Field::Email, "luis@correo.pe");
    form.set(Field::Phone, "912345678");
    form.set(Field::Password, "llama99");
    form.set(Field::Location, "Puno");
    form.check(RadioGroup::DiscoveryMethod, "friend");
    form.terms_accepted = true;

    let first = service.register(&form).await.unwrap();
    assert!(first.client().unwrap().favorite_businesses.is_empty());

    let err = service.register(&form).await.unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateEmail { .. }));
    assert_eq!(err.to_string(), "this email is already registered");
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}
