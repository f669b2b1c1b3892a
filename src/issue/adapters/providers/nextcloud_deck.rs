//! Nextcloud Deck adapter.

use super::{BacklogSource, BulkRefresh, ItemBackend, LinkSource, text};
use crate::issue::domain::{
    FreshnessMarker, FreshnessPolicy, IssueId, IssueProviderConfig, IssueProviderKind,
    NextcloudDeckSettings, ProviderSettings, RemoteIssue, TaskChanges,
};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Nextcloud Deck cards.
///
/// Cards are compared by their `lastModified` token and refreshed in bulk
/// from the list of open cards. The adapter keeps the most recently
/// resolved settings to answer [`ItemBackend::poll_interval`]; the cell is
/// never used for anything else.
#[derive(Debug, Clone, Default)]
pub struct NextcloudDeckAdapter {
    last_settings: Arc<RwLock<Option<NextcloudDeckSettings>>>,
}

fn settings(config: &IssueProviderConfig) -> Option<&NextcloudDeckSettings> {
    match config.settings() {
        ProviderSettings::NextcloudDeck(settings) => Some(settings),
        _ => None,
    }
}

/// Renders a title template.
///
/// Supported placeholders: `{CARD_TITLE}`, `{COLUMN}`, `{BOARD}`, `{ID}`
/// and `{LABELS}` (comma separated).
fn render_title(template: &str, issue: &RemoteIssue, deck: &NextcloudDeckSettings) -> String {
    template
        .replace("{CARD_TITLE}", issue.title())
        .replace("{COLUMN}", issue.stack_title().unwrap_or_default())
        .replace(
            "{BOARD}",
            deck.selected_board_title.as_deref().unwrap_or_default(),
        )
        .replace("{ID}", issue.id().as_str())
        .replace("{LABELS}", &issue.labels().join(", "))
}

impl ItemBackend for NextcloudDeckAdapter {
    fn kind(&self) -> IssueProviderKind {
        IssueProviderKind::NextcloudDeck
    }

    fn is_enabled(&self, config: &IssueProviderConfig) -> bool {
        config.is_enabled()
            && settings(config).is_some_and(|deck| {
                text::is_present(deck.nextcloud_base_url.as_ref())
                    && text::is_present(deck.username.as_ref())
                    && text::is_present(deck.password.as_ref())
            })
    }

    fn freshness_policy(&self, _config: &IssueProviderConfig) -> FreshnessPolicy {
        FreshnessPolicy::Identity
    }

    fn remote_marker(&self, issue: &RemoteIssue) -> Option<FreshnessMarker> {
        issue.updated().map(|raw| {
            raw.trim().parse::<i64>().map_or_else(
                |_| FreshnessMarker::Identity(raw.to_owned()),
                FreshnessMarker::Timestamp,
            )
        })
    }

    fn issue_title(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> String {
        settings(config)
            .and_then(|deck| {
                deck.title_template
                    .as_deref()
                    .filter(|template| !template.is_empty())
                    .map(|template| render_title(template, issue, deck))
            })
            .unwrap_or_else(|| issue.title().to_owned())
    }

    fn snack_title(&self, issue: &RemoteIssue, _config: &IssueProviderConfig) -> String {
        text::truncate(issue.title())
    }

    fn task_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            issue_last_updated: self.remote_marker(issue),
            notes: issue
                .description()
                .filter(|description| !description.is_empty())
                .map(str::to_owned),
            ..TaskChanges::titled(self.issue_title(issue, config))
        }
    }

    fn refresh_changes(&self, issue: &RemoteIssue, config: &IssueProviderConfig) -> TaskChanges {
        TaskChanges {
            is_done: Some(issue.state() == Some("done")),
            ..self.task_changes(issue, config).mark_updated()
        }
    }

    fn link(&self, issue_id: &IssueId, config: &IssueProviderConfig) -> LinkSource {
        let url = settings(config)
            .and_then(|deck| {
                let board = deck.selected_board_id?;
                let base = deck.nextcloud_base_url.as_deref().unwrap_or_default();
                let trimmed = base.strip_suffix('/').unwrap_or(base);
                Some(format!("{trimmed}/apps/deck/board/{board}/card/{issue_id}"))
            })
            .unwrap_or_default();
        LinkSource::Url(url)
    }

    fn bulk_refresh(&self) -> BulkRefresh {
        BulkRefresh::OpenItems
    }

    fn backlog_source(&self, _config: &IssueProviderConfig) -> BacklogSource {
        BacklogSource::OpenItems
    }

    fn observe_config(&self, config: &IssueProviderConfig) {
        let Some(deck) = settings(config) else {
            return;
        };
        if let Ok(mut cell) = self.last_settings.write() {
            *cell = Some(deck.clone());
        }
    }

    fn poll_interval(&self) -> Duration {
        let minutes = self
            .last_settings
            .read()
            .ok()
            .and_then(|cell| cell.as_ref().and_then(|deck| deck.poll_interval_minutes))
            .filter(|minutes| *minutes > 0);
        minutes.map_or_else(
            || self.kind().default_poll_interval(),
            |value| Duration::from_secs(u64::from(value) * 60),
        )
    }
}
