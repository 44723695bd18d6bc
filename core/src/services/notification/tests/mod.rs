//! Notification flow tests
