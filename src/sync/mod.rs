//! Coordination between remote refreshes and full data reloads.
//!
//! An external reload process replaces local state after a sync exchange.
//! Anything that reads that state on a schedule must not run while the
//! reload is half applied. This module provides the explicit completion
//! contract and the two periodic consumers built on it:
//!
//! - Reload generations and repeat configurations in [`domain`]
//! - Port contracts for the task store and repeat planner in [`ports`]
//! - In-memory port implementations in [`adapters`]
//! - The reload coordinator, due-task consumer and issue poller in
//!   [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
