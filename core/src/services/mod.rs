//! Business services containing domain logic and use cases.

pub mod notification;
pub mod token;

// Re-export commonly used types
pub use notification::{EmailChangeService, NotificationConfig, SignupService};
pub use token::{TokenServiceConfig, VerificationTokenService};
