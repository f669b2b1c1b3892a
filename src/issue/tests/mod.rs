//! Unit tests for the issue provider module.

mod registry_tests;
mod support;
