//! Repeat configurations that spawn tasks on a schedule.

use super::SyncDomainError;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a repeat configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepeatCfgId(String);

impl RepeatCfgId {
    /// Creates a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::EmptyRepeatCfgId`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SyncDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(SyncDomainError::EmptyRepeatCfgId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RepeatCfgId {
    type Error = SyncDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RepeatCfgId> for String {
    fn from(value: RepeatCfgId) -> Self {
        value.0
    }
}

impl fmt::Display for RepeatCfgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar unit of a repeat interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatUnit {
    /// Calendar days.
    Day,
    /// Weeks of seven days.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

/// A task template that is instantiated every `repeat_every` units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRepeatCfg {
    id: RepeatCfgId,
    title: String,
    #[serde(default)]
    last_task_creation: Option<NaiveDate>,
    repeat_every: u32,
    repeat_every_unit: RepeatUnit,
}

impl TaskRepeatCfg {
    /// Creates a configuration that has never produced a task.
    ///
    /// # Errors
    ///
    /// Returns [`SyncDomainError::ZeroRepeatInterval`] when `repeat_every`
    /// is zero.
    pub fn new(
        id: RepeatCfgId,
        title: impl Into<String>,
        repeat_every: u32,
        repeat_every_unit: RepeatUnit,
    ) -> Result<Self, SyncDomainError> {
        if repeat_every == 0 {
            return Err(SyncDomainError::ZeroRepeatInterval);
        }
        Ok(Self {
            id,
            title: title.into(),
            last_task_creation: None,
            repeat_every,
            repeat_every_unit,
        })
    }

    /// Sets the day the last task was created.
    #[must_use]
    pub const fn with_last_task_creation(mut self, day: NaiveDate) -> Self {
        self.last_task_creation = Some(day);
        self
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> &RepeatCfgId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the day the last task was created.
    #[must_use]
    pub const fn last_task_creation(&self) -> Option<NaiveDate> {
        self.last_task_creation
    }

    /// Returns the first day a new task is due, or `None` when the next
    /// date is out of range.
    #[must_use]
    pub fn next_due_day(&self) -> Option<NaiveDate> {
        let Some(last) = self.last_task_creation else {
            return Some(NaiveDate::MIN);
        };
        let every = self.repeat_every;
        match self.repeat_every_unit {
            RepeatUnit::Day => last.checked_add_days(Days::new(u64::from(every))),
            RepeatUnit::Week => last.checked_add_days(Days::new(u64::from(every) * 7)),
            RepeatUnit::Month => last.checked_add_months(Months::new(every)),
            RepeatUnit::Year => last.checked_add_months(Months::new(every.checked_mul(12)?)),
        }
    }

    /// Returns whether a task must be created on `today`.
    #[must_use]
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        self.next_due_day().is_some_and(|due| due <= today)
    }
}
