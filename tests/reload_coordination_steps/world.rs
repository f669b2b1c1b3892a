//! Shared world state for reload coordination scenarios.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use issue_sync::issue::{
    adapters::{
        memory::{InMemoryConfigStore, InMemoryIssueApi},
        providers::{Backend, ItemAdapter},
    },
    domain::{
        GitHubSettings, IssueProviderConfig, IssueProviderId, IssueProviderKind, ProviderSettings,
    },
    services::{IssueProviderService, ProviderRegistry},
};
use issue_sync::sync::{
    adapters::memory::{
        InMemoryDueTaskPlanner, InMemoryIssueTaskStore, InMemoryTaskRepeatCfgRepository,
    },
    domain::{RepeatCfgId, RepeatUnit, TaskRepeatCfg},
    services::{
        DueTaskConsumer, DueTaskError, DueTaskReport, PollOutcome, ReloadCoordinator,
        ReloadTicket,
    },
};
use mockable::Clock;
use rstest::fixture;
use tokio::task::JoinHandle;

/// Clock frozen at noon UTC of one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freezes the clock on `day`.
    pub fn on(day: NaiveDate) -> eyre::Result<Self> {
        let noon = day
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| eyre::eyre!("noon is not a valid time on {day}"))?;
        Ok(Self(Utc.from_utc_datetime(&noon)))
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Consumer type used by the scenarios.
pub type TestConsumer =
    DueTaskConsumer<InMemoryTaskRepeatCfgRepository, InMemoryDueTaskPlanner, FixedClock>;

/// Scenario world for reload coordination.
pub struct ReloadWorld {
    /// Coordinator shared by every background service.
    pub reloads: ReloadCoordinator,
    /// Repeat configuration store.
    pub repeat_cfgs: Arc<InMemoryTaskRepeatCfgRepository>,
    /// Records created tasks.
    pub planner: Arc<InMemoryDueTaskPlanner>,
    /// Repeat configurations the store currently holds.
    pub stored_cfgs: Vec<TaskRepeatCfg>,
    /// Day the clock reports.
    pub today: Option<NaiveDate>,
    /// Reload started by a step and not yet finished.
    pub ticket: Option<ReloadTicket>,
    /// Due-task run waiting for the reload.
    pub pending_run: Option<JoinHandle<Result<DueTaskReport, DueTaskError>>>,
    /// Linked task store.
    pub tasks: Arc<InMemoryIssueTaskStore>,
    /// GitHub API double.
    pub github: Arc<InMemoryIssueApi>,
    /// Provider registry.
    pub registry: Arc<ProviderRegistry<InMemoryConfigStore>>,
    /// Outcome of the last poll.
    pub poll_outcome: Option<PollOutcome>,
}

impl ReloadWorld {
    /// Creates a world with empty stores and one GitHub provider.
    pub fn new() -> eyre::Result<Self> {
        let store = Arc::new(InMemoryConfigStore::new());
        store.insert(IssueProviderConfig::new(
            IssueProviderId::new("gh")?,
            ProviderSettings::GitHub(GitHubSettings {
                repo: Some("acme/widgets".to_owned()),
                ..GitHubSettings::default()
            }),
        ))?;
        let github = Arc::new(InMemoryIssueApi::new());
        let adapter = ItemAdapter::for_kind(IssueProviderKind::GitHub)
            .ok_or_else(|| eyre::eyre!("GitHub should have an item adapter"))?;
        let mut registry = ProviderRegistry::new();
        registry.register(IssueProviderService::new(
            store,
            Backend::per_item(adapter, Arc::<InMemoryIssueApi>::clone(&github)),
        ));
        Ok(Self {
            reloads: ReloadCoordinator::new(),
            repeat_cfgs: Arc::new(InMemoryTaskRepeatCfgRepository::default()),
            planner: Arc::new(InMemoryDueTaskPlanner::new()),
            stored_cfgs: Vec::new(),
            today: None,
            ticket: None,
            pending_run: None,
            tasks: Arc::new(InMemoryIssueTaskStore::default()),
            github,
            registry: Arc::new(registry),
            poll_outcome: None,
        })
    }

    /// Builds a consumer reading the world's stores.
    pub fn consumer(&self) -> eyre::Result<TestConsumer> {
        let today = self
            .today
            .ok_or_else(|| eyre::eyre!("scenario did not set today"))?;
        Ok(DueTaskConsumer::new(
            Arc::clone(&self.repeat_cfgs),
            Arc::clone(&self.planner),
            Arc::new(FixedClock::on(today)?),
            self.reloads.clone(),
        ))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReloadWorld {
    ReloadWorld::new().expect("world setup should succeed")
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a `YYYY-MM-DD` day.
pub fn parse_day(raw: &str) -> eyre::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")?)
}

/// Builds a daily repeat configuration last used on `last`.
pub fn repeat_cfg(id: &str, last: &str) -> eyre::Result<TaskRepeatCfg> {
    Ok(
        TaskRepeatCfg::new(RepeatCfgId::new(id)?, format!("repeat {id}"), 1, RepeatUnit::Day)?
            .with_last_task_creation(parse_day(last)?),
    )
}
