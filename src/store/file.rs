//! JSON-file account store.
//!
//! The whole account list lives in one JSON array, rewritten on every change.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::account::Account;
use crate::error::StoreError;

use super::memory::{insert_unique, replace};
use super::traits::AccountStore;

/// Accounts persisted to a JSON file, cached in memory.
#[derive(Debug)]
pub struct FileStore {
    accounts: RwLock<Vec<Account>>,
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`, loading existing accounts if the file exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let accounts = if tokio::fs::try_exists(&path).await? {
            let contents = tokio::fs::read_to_string(&path).await?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&contents)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?
            }
        } else {
            Vec::new()
        };

        info!(path = %path.display(), accounts = accounts.len(), "Account store opened");
        Ok(Self {
            accounts: RwLock::new(accounts),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, accounts: &[Account]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_string_pretty(accounts)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, contents).await?;
        debug!(path = %self.path.display(), "Account store saved");
        Ok(())
    }
}

#[async_trait]
impl AccountStore for FileStore {
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
        if let Err(e) = self.save(&accounts).await {
            accounts.pop();
            return Err(e);
        }
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        let previous = accounts.clone();
        replace(&mut accounts, account)?;
        if let Err(e) = self.save(&accounts).await {
            *accounts = previous;
            return Err(e);
        }
        Ok(())
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
        form.check(RadioGroup::Role, "facilitator");
        form.set(Field::Name, "Test");
        form.set(Field::Email, email);
        Account::from_form(&form, Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("accounts.json");

        let store = FileStore::open(&path).await.unwrap();
        let a = account("a@sumak.pe");
        store.insert(&a).await.unwrap();
        assert!(path.exists());
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        let all = reopened.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[0].email, "a@sumak.pe");
    }

    #[tokio::test]
    async fn missing_file_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path().join("none.json")).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("accounts.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            FileStore::open(&path).await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn update_is_written_through() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("accounts.json");
        let store = FileStore::open(&path).await.unwrap();
        let mut a = account("a@sumak.pe");
        store.insert(&a).await.unwrap();
        a.phone = "911111111".into();
        store.update(&a).await.unwrap();

        let reopened = FileStore::open(&path).await.unwrap();
        let found = reopened.find_by_email("a@sumak.pe").await.unwrap().unwrap();
        assert_eq!(found.phone, "911111111");
    }

    #[tokio::test]
    async fn duplicate_email_not_written() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("accounts.json");
        let store = FileStore::open(&path).await.unwrap();
        store.insert(&account("a@sumak.pe")).await.unwrap();
        assert!(store.insert(&account("a@sumak.pe")).await.is_err());

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(reopened.list_all().await.unwrap().len(), 1);
    }
}
