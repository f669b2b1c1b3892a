//! Step definitions for reload coordination scenarios.

mod given;
mod then;
mod when;
pub mod world;
