//! Account-email notification flows
//!
//! Two flows, each in two independent phases. The request phase validates
//! the address and enqueues work through the dispatch layer, returning as
//! soon as admission succeeds; a worker later looks the account up, mints a
//! token and sends the email. The complete phase is pure synchronous token
//! validation; the token itself is the only state carried between phases.

mod config;
mod email_address;
mod email_change;
mod signup;

#[cfg(test)]
mod tests;

pub use config::{NotificationConfig, TemplateIds};
pub use email_address::is_valid_email;
pub use email_change::{EmailChangeService, EmailChangeTask, EMAIL_CHANGE_TASK};
pub use signup::{SignupService, SignupTask, SIGNUP_TASK};
