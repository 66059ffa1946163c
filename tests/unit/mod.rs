//! Unit test harness for scope-stepper.
//!
//! Organizes the configuration tests that go through the public API.

mod config_parsing;
mod config_validation;
