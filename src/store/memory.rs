//! In-memory account store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::account::Account;
use crate::error::StoreError;

use super::traits::AccountStore;

/// Accounts kept in a `Vec`, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of accounts.
    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: RwLock::new(accounts),
        }
    }
}

/// Shared insert logic: emails are unique at creation time.
pub(crate) fn insert_unique(accounts: &mut Vec<Account>, account: &Account) -> Result<(), StoreError> {
    if accounts.iter().any(|a| a.email == account.email) {
        return Err(StoreError::DuplicateEmail {
            email: account.email.clone(),
        });
    }
    accounts.push(account.clone());
    Ok(())
}

/// Shared update logic: replace by id.
pub(crate) fn replace(accounts: &mut [Account], account: &Account) -> Result<(), StoreError> {
    let slot = accounts
        .iter_mut()
        .find(|a| a.id == account.id)
        .ok_or(StoreError::NotFound { id: account.id })?;
    *slot = account.clone();
    Ok(())
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn insert(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        insert_unique(&mut accounts, account)?;
        debug!(account_id = %account.id, total = accounts.len(), "Account inserted");
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        replace(&mut accounts, account)
    }

    async fn list_all(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::wizard::{Field, FormSnapshot, RadioGroup};

    fn account(email: &str) -> Account {
        let mut form = FormSnapshot::default();
        form.check(RadioGroup::Role, "client");
        form.set(Field::Name, "Test");
        form.set(Field::Email, email);
        form.set(Field::Location, "Lima");
        Account::from_form(&form, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn insert_and_find() {
        let store = MemoryStore::new();
        let a = account("a@sumak.pe");
        store.insert(&a).await.unwrap();

        let found = store.find_by_email("a@sumak.pe").await.unwrap().unwrap();
        assert_eq!(found.id, a.id);
        assert!(store.find_by_email("b@sumak.pe").await.unwrap().is_none());
        assert!(store.get(a.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let store = MemoryStore::new();
        store.insert(&account("a@sumak.pe")).await.unwrap();
        let err = store.insert(&account("a@sumak.pe")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail { .. }));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_replaces_by_id() {
        let store = MemoryStore::new();
        let mut a = account("a@sumak.pe");
        store.insert(&a).await.unwrap();
        a.name = "Renamed".into();
        store.update(&a).await.unwrap();
        assert_eq!(store.get(a.id).await.unwrap().unwrap().name, "Renamed");

        let stranger = account("c@sumak.pe");
        assert!(matches!(
            store.update(&stranger).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryStore::with_accounts(vec![account("1@sumak.pe")]);
        store.insert(&account("2@sumak.pe")).await.unwrap();
        let emails: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.email)
            .collect();
        assert_eq!(emails, vec!["1@sumak.pe", "2@sumak.pe"]);
    }
}
