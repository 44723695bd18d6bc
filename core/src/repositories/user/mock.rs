//! Mock implementation of UserStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

use super::trait_::UserStore;

/// In-memory user store for tests and local development
#[derive(Default)]
pub struct MockUserStore {
    accounts: Arc<RwLock<HashMap<i64, UserAccount>>>,
}

impl MockUserStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account, replacing any previous entry with the same id
    pub async fn insert(&self, account: UserAccount) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.account_id, account);
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_account_id(
        &self,
        account_id: i64,
    ) -> Result<Option<UserAccount>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&account_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_by_email_and_id() {
        let store = MockUserStore::new();
        store.insert(UserAccount::new(7, "someone@example.com")).await;

        let by_email = store.find_by_email("someone@example.com").await.unwrap();
        assert_eq!(by_email, Some(UserAccount::new(7, "someone@example.com")));

        let by_id = store.find_by_account_id(7).await.unwrap();
        assert_eq!(by_id.unwrap().email, "someone@example.com");

        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
        assert!(store.find_by_account_id(8).await.unwrap().is_none());
    }
}
