//! `AccountStore` trait: the only way the core reaches persisted accounts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::account::Account;
use crate::error::StoreError;

/// Backend-agnostic account storage.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    /// Get an account by id.
    async fn get(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    /// Insert a new account. Fails with `DuplicateEmail` if the email is taken.
    async fn insert(&self, account: &Account) -> Result<(), StoreError>;

    /// Replace a stored account with the same id.
    async fn update(&self, account: &Account) -> Result<(), StoreError>;

    /// All accounts in insertion order.
    async fn list_all(&self) -> Result<Vec<Account>, StoreError>;
}
