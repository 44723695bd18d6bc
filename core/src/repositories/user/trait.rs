//! User store trait defining the account lookup boundary.
//!
//! The account database belongs to the surrounding identity system; the
//! notification flows only ever read from it. Implementations live in the
//! infrastructure layer (or in tests, as [`super::mock::MockUserStore`]).

use async_trait::async_trait;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

/// Read-only access to registered accounts
///
/// # Returns
///
/// Both lookups distinguish "no such account" (`Ok(None)`) from a store
/// failure (`Err`): the former is a valid branch for the flows, the latter
/// enters the dispatch retry path.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find an account by its email address
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, DomainError>;

    /// Find an account by its numeric identifier
    async fn find_by_account_id(&self, account_id: i64)
        -> Result<Option<UserAccount>, DomainError>;
}
