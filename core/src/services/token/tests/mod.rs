//! Verification token service tests

mod service_tests;
