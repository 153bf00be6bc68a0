use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::account::errors::StoreError;
use crate::account::ports::UserStore;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;

/// In-memory account store.
///
/// Backs local runs and integration tests; the production store lives
/// behind the same port in an external system. Uniqueness of username and
/// email is enforced on create, mirroring the database constraints the
/// real store would carry.
pub struct InMemoryUserStore {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| &account.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.username == username)
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|existing| existing.username == account.username)
        {
            return Err(StoreError::Duplicate(account.username));
        }
        if accounts
            .values()
            .any(|existing| existing.email == account.email)
        {
            return Err(StoreError::Duplicate(account.email.to_string()));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(StoreError::Missing(account.id.to_string()));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, email: &str) -> Account {
        Account::new(
            username.to_string(),
            EmailAddress::new(email).unwrap(),
            "$argon2id$hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryUserStore::new();
        let created = store
            .create(account("alice", "alice@example.com"))
            .await
            .unwrap();

        let by_email = store
            .find_by_email(&EmailAddress::new("alice@example.com").unwrap())
            .await
            .unwrap();
        assert_eq!(by_email, Some(created.clone()));

        let by_username = store.find_by_username("alice").await.unwrap();
        assert_eq!(by_username, Some(created));

        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_enforces_uniqueness() {
        let store = InMemoryUserStore::new();
        store
            .create(account("alice", "alice@example.com"))
            .await
            .unwrap();

        let same_username = store.create(account("alice", "other@example.com")).await;
        assert!(matches!(same_username, Err(StoreError::Duplicate(_))));

        let same_email = store.create(account("bob", "alice@example.com")).await;
        assert!(matches!(same_email, Err(StoreError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_update_requires_existing_account() {
        let store = InMemoryUserStore::new();

        let unknown = store.update(account("ghost", "ghost@example.com")).await;
        assert!(matches!(unknown, Err(StoreError::Missing(_))));

        let mut created = store
            .create(account("alice", "alice@example.com"))
            .await
            .unwrap();
        created.begin_reset(
            "reset-token".to_string(),
            chrono::Utc::now() + chrono::Duration::minutes(3),
        );

        let updated = store.update(created).await.unwrap();
        assert!(updated.password_hash.is_none());
        assert_eq!(updated.reset_token.as_deref(), Some("reset-token"));
    }
}
