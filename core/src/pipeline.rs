//! One podium update run, end to end.
//!
//! Single-threaded and synchronous in shape: fetch, filter, aggregate,
//! render, merge, then persist at most once. Every step consumes immutable
//! inputs and returns new values; nothing is shared across runs.

use tracing::{debug, info};

use podium_types::ReportSettings;

use crate::api::{GroupStore, PartyChatSource};
use crate::chat::filter::{TimeWindow, filter_by_kind};
use crate::chat::kind;
use crate::document::merge_section;
use crate::error::PodiumError;
use crate::metrics::{aggregate_damage, aggregate_skills};
use crate::report::{PODIUM_HEADER, build_section_body, render_podium};

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The merged description differed and was persisted.
    Updated { group_id: String },
    /// The merged description matched the stored one; no update call made.
    AlreadyCurrent,
}

/// A computed update that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct PodiumUpdate {
    pub group_id: String,
    pub current: String,
    pub updated: String,
}

impl PodiumUpdate {
    /// True when persisting would change nothing. Trimmed comparison, so
    /// incidental leading/trailing whitespace never forces an update.
    pub fn is_noop(&self) -> bool {
        self.updated.trim() == self.current.trim()
    }
}

/// Fetch, aggregate, render, and merge for the given window; do not
/// persist.
pub async fn compute_podium_update<C>(
    client: &C,
    settings: &ReportSettings,
    window: TimeWindow,
) -> Result<PodiumUpdate, PodiumError>
where
    C: PartyChatSource + GroupStore + Sync,
{
    let chat = client.fetch_party_chat().await?;
    if chat.is_empty() {
        return Err(PodiumError::NoChatMessages);
    }

    let damage_messages = filter_by_kind(&chat, kind::BOSS_DAMAGE, &window);
    if damage_messages.is_empty() {
        return Err(PodiumError::NoRecentDamage {
            days: settings.days,
        });
    }
    let damage = aggregate_damage(&damage_messages);

    let skill_messages = filter_by_kind(&chat, kind::PARTY_SKILL, &window);
    let skills = aggregate_skills(&skill_messages)?;
    debug!(
        actors = damage.len(),
        casters = skills.len(),
        damage_events = damage_messages.len(),
        "aggregated window"
    );

    let report = render_podium(&damage, Some(&skills), &window, settings.top_n);
    let body = build_section_body(&report, window.end);

    // Validate the merge target before computing the merge.
    let group = client.fetch_group().await?;
    let (group_id, description) = match (group.id, group.description) {
        (Some(id), Some(description)) if !id.is_empty() && !description.is_empty() => {
            (id, description)
        }
        _ => return Err(PodiumError::MissingGroupRecord),
    };

    let updated = merge_section(&description, PODIUM_HEADER, &body);
    Ok(PodiumUpdate {
        group_id,
        current: description,
        updated,
    })
}

/// Run a full update against the trailing window from the settings.
pub async fn run_podium_update<C>(
    client: &C,
    settings: &ReportSettings,
) -> Result<RunOutcome, PodiumError>
where
    C: PartyChatSource + GroupStore + Sync,
{
    let window = TimeWindow::trailing_days(settings.days);
    run_for_window(client, settings, window).await
}

/// Compute the update for `window` and persist it only when the merged
/// document differs.
pub async fn run_for_window<C>(
    client: &C,
    settings: &ReportSettings,
    window: TimeWindow,
) -> Result<RunOutcome, PodiumError>
where
    C: PartyChatSource + GroupStore + Sync,
{
    let update = compute_podium_update(client, settings, window).await?;
    if update.is_noop() {
        info!(group_id = %update.group_id, "podium section already up to date");
        return Ok(RunOutcome::AlreadyCurrent);
    }

    client
        .update_description(&update.group_id, &update.updated)
        .await?;
    info!(group_id = %update.group_id, "group description updated");
    Ok(RunOutcome::Updated {
        group_id: update.group_id,
    })
}
