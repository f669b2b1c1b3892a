//! Adapter implementations of the sync ports.

pub mod memory;
