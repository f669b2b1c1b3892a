//! In-memory calendar feed.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::lock_poisoned;
use crate::issue::{
    domain::{CalendarEvent, IssueProviderConfig},
    ports::{CalendarApi, IssueApiError, IssueApiResult},
};

/// Thread-safe in-memory calendar feed.
///
/// Each configuration sees the events whose calendar id matches its
/// provider id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCalendarApi {
    state: Arc<RwLock<InMemoryCalendarState>>,
}

#[derive(Debug, Default)]
struct InMemoryCalendarState {
    events: Vec<CalendarEvent>,
    failure: Option<IssueApiError>,
    requests: usize,
}

impl InMemoryCalendarApi {
    /// Creates a feed serving `events`.
    #[must_use]
    pub fn with_events(events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        let api = Self::default();
        if let Ok(mut state) = api.state.write() {
            state.events = events.into_iter().collect();
        }
        api
    }

    /// Replaces the served events.
    pub fn set_events(&self, events: Vec<CalendarEvent>) {
        if let Ok(mut state) = self.state.write() {
            state.events = events;
        }
    }

    /// Makes every following call fail with `error`.
    pub fn fail_with(&self, error: IssueApiError) {
        if let Ok(mut state) = self.state.write() {
            state.failure = Some(error);
        }
    }

    /// Returns how many event listings were requested.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.state.read().map_or(0, |state| state.requests)
    }
}

#[async_trait]
impl CalendarApi for InMemoryCalendarApi {
    async fn request_events(
        &self,
        config: &IssueProviderConfig,
        _include_past: bool,
    ) -> IssueApiResult<Vec<CalendarEvent>> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        state.requests += 1;
        if let Some(failure) = &state.failure {
            return Err(failure.clone());
        }
        Ok(state
            .events
            .iter()
            .filter(|event| event.calendar_provider_id() == config.provider_id())
            .cloned()
            .collect())
    }

    async fn test_connection(&self, _config: &IssueProviderConfig) -> IssueApiResult<bool> {
        let state = self.state.read().map_err(lock_poisoned)?;
        state.failure.clone().map_or(Ok(true), Err)
    }
}
