//! Dispatch layer tests
