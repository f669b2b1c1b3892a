//! Issue provider integration for local tasks.
//!
//! This module lets every external issue tracker plug into one contract for
//! fetching, searching and detecting whether a remote issue changed since a
//! local task last observed it. Backends differ in how they signal change
//! (timestamps, etags, comment streams, whole-event diffs); the engine keeps
//! the caller-facing behaviour identical across all of them. The module
//! follows hexagonal architecture:
//!
//! - Domain types and freshness comparators in [`domain`]
//! - Port contracts for configuration and backend APIs in [`ports`]
//! - Per-backend adapters and in-memory port implementations in [`adapters`]
//! - The provider engine and registry in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
