//! AccountService: registration, login, recovery, and task completion
//! against an `AccountStore`.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::account::{Account, Role};
use crate::config::SumakConfig;
use crate::error::{self, AuthError, RegistrationError, StoreError, TaskError};
use crate::store::{AccountStore, FileStore};
use crate::tasks::{self, Task};
use crate::wizard::{FieldKind, FormSnapshot, validate, validate_submission};

use super::recovery::RecoveryCode;
use super::session::Session;

/// Account operations the UI calls after the wizard or the login form.
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    config: SumakConfig,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, config: SumakConfig) -> Self {
        Self { store, config }
    }

    /// Build a service over the JSON file named by `config.store_path`.
    pub async fn open(config: SumakConfig) -> error::Result<Self> {
        let store = FileStore::open(&config.store_path).await?;
        Ok(Self::new(Arc::new(store), config))
    }

    /// Read `SUMAK_*` settings, then open the file store they point at.
    pub async fn from_env() -> error::Result<Self> {
        let config = SumakConfig::from_env()?;
        Self::open(config).await
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    async fn simulate_latency(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Create an account from a submitted form.
    ///
    /// The form must pass every wizard step and have the terms accepted.
    /// Entrepreneurs get their task path generated here, once, after the
    /// account is populated and before it is stored.
    pub async fn register(&self, form: &FormSnapshot) -> Result<Account, RegistrationError> {
        validate_submission(form)?;
        self.simulate_latency(self.config.latency.register).await;

        let mut account = Account::from_form(form, Utc::now())?;

        if self.store.find_by_email(&account.email).await?.is_some() {
            warn!(email = %account.email, "Registration with existing email");
            return Err(RegistrationError::DuplicateEmail {
                email: account.email,
            });
        }

        if account.role() == Role::Entrepreneur {
            let path = tasks::generate_for(&account)?;
            if let Some(profile) = account.entrepreneur_mut() {
                profile.personalized_path = path;
            }
        }

        self.store.insert(&account).await?;

        info!(
            account_id = %account.id,
            role = %account.role(),
            tasks = account.entrepreneur().map_or(0, |p| p.personalized_path.len()),
            "Account created"
        );
        Ok(account)
    }

    /// Log in with email and credential.
    pub async fn login(
        &self,
        email: &str,
        credential: &str,
        remember: bool,
    ) -> Result<Session, AuthError> {
        self.simulate_latency(self.config.latency.login).await;

        let mut account = match self.store.find_by_email(email).await? {
            Some(a) if a.credential == credential => a,
            _ => {
                warn!(email = %email, "Failed login");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let now = Utc::now();
        account.last_login = now;
        self.store.update(&account).await?;

        info!(account_id = %account.id, role = %account.role(), "Logged in");
        Ok(Session::start(&account, remember, now))
    }

    /// Issue a recovery code for the account with this email.
    ///
    /// The code is kept on the account until redeemed; a new request
    /// replaces any earlier code.
    pub async fn request_recovery(&self, email: &str) -> Result<RecoveryCode, AuthError> {
        self.simulate_latency(self.config.latency.recovery).await;

        let mut account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UnknownEmail)?;

        let code = RecoveryCode::issue(
            &account.email,
            &account.phone,
            self.config.recovery_code_ttl,
            Utc::now(),
        );
        account.recovery = Some(code.clone());
        self.store.update(&account).await?;

        info!(account_id = %account.id, expires_at = %code.expires_at, "Recovery code issued");
        Ok(code)
    }

    /// Set a new credential using the code last issued for this email.
    pub async fn reset_credential(
        &self,
        email: &str,
        code: u32,
        new_credential: &str,
    ) -> Result<(), AuthError> {
        let mut account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UnknownEmail)?;

        let Some(recovery) = &account.recovery else {
            warn!(account_id = %account.id, "Reset without an issued recovery code");
            return Err(AuthError::InvalidRecoveryCode);
        };
        recovery.verify(code, Utc::now())?;
        validate(FieldKind::Password, new_credential).map_err(AuthError::InvalidPassword)?;

        account.credential = new_credential.to_string();
        account.recovery = None;
        self.store.update(&account).await?;

        info!(account_id = %account.id, "Credential reset");
        Ok(())
    }

    /// Mark one of an entrepreneur's tasks as completed.
    pub async fn complete_task(&self, account_id: Uuid, task_id: u32) -> Result<Task, TaskError> {
        let mut account = self
            .store
            .get(account_id)
            .await?
            .ok_or(StoreError::NotFound { id: account_id })?;

        let profile = account
            .entrepreneur_mut()
            .ok_or(TaskError::NotEntrepreneur(account_id))?;
        let task = profile.complete_task(task_id, Utc::now())?.clone();

        self.store.update(&account).await?;
        info!(account_id = %account_id, task_id, "Task completed");
        Ok(task)
    }
}
