//! Domain model for reload coordination and repeatable tasks.

mod error;
mod reload;
mod repeat;

pub use error::SyncDomainError;
pub use reload::ReloadState;
pub use repeat::{RepeatCfgId, RepeatUnit, TaskRepeatCfg};
