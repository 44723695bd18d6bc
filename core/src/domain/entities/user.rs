//! User account entity as seen by the notification flows.
//!
//! Account storage itself lives behind [`crate::repositories::UserStore`];
//! this is the read-only projection the flows need for lookups.

use serde::{Deserialize, Serialize};

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Stable numeric account identifier
    pub account_id: i64,

    /// The account's current email address
    pub email: String,
}

impl UserAccount {
    pub fn new(account_id: i64, email: impl Into<String>) -> Self {
        Self {
            account_id,
            email: email.into(),
        }
    }
}
