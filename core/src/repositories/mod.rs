//! Repository interfaces for external persistence collaborators.

pub mod user;

pub use user::{MockUserStore, UserStore};

// Account entity re-exported next to its store for convenience
pub use crate::domain::entities::user::UserAccount;
