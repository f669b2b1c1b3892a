//! Adapter implementations for issue provider ports.

pub mod memory;
pub mod providers;
