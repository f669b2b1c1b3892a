//! Issue sync: keeps local tasks in step with remote issue trackers.
//!
//! This crate polls linked issues on a dozen tracker backends and an iCal
//! feed, decides per backend whether the remote side changed since the
//! last sync, and builds the patch to apply to the local task. Background
//! work is coordinated with full data reloads so nothing acts on state a
//! reload is replacing.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure data and freshness rules with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for tracker APIs and stores
//! - **Adapters**: Per-backend hooks and in-memory implementations of ports
//!
//! # Modules
//!
//! - [`issue`]: Provider base engine, freshness comparators and backend
//!   adapters
//! - [`sync`]: Reload coordination, the due-task consumer and the issue
//!   poller

pub mod issue;
pub mod sync;
