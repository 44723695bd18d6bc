//! Email address format validation.
//!
//! Worried about an imperfect regex? See
//! <http://www.regular-expressions.info/email.html>.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{DomainError, DomainResult};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\A[A-Z0-9._%+-]{1,64}@(?:[A-Z0-9-]*\.){1,125}[A-Z]{2,63}\z")
        .expect("email pattern must compile")
});

/// Syntactic email check; the length bound caps regex work on oversized input
pub fn is_valid_email(s: &str) -> bool {
    s.len() < 255 && EMAIL_PATTERN.is_match(s)
}

pub(crate) fn ensure_valid_email(email: &str) -> DomainResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(DomainError::Validation {
            message: "invalid email address format".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("a@x.io"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
        assert!(is_valid_email("UPPER@EXAMPLE.COM"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@x.io"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email(&format!("{}@x.io", "a".repeat(300))));
    }
}
