//! Trailing time-window selection over the chat stream.

use chrono::{DateTime, Duration, Utc};

use super::ChatMessage;

/// The trailing window a report covers.
///
/// Filtering only checks the lower bound; `end` labels the report period.
/// The podium has always meant "the last N days up to now", so an event
/// timestamped after `end` would still be counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window covering the last `days` days, ending now.
    pub fn trailing_days(days: u32) -> Self {
        Self::ending_at(Utc::now(), days)
    }

    /// Window covering the `days` days up to `end`.
    pub fn ending_at(end: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: end - Duration::days(i64::from(days)),
            end,
        }
    }
}

/// Select messages of `kind` whose timestamp falls at or after the window
/// start, compared at millisecond precision (inclusive at the exact
/// boundary). Messages without a usable timestamp are excluded rather than
/// failing the run. Relative input order is preserved.
pub fn filter_by_kind<'a>(
    messages: &'a [ChatMessage],
    kind: &str,
    window: &TimeWindow,
) -> Vec<&'a ChatMessage> {
    let start_ms = window.start.timestamp_millis();
    messages
        .iter()
        .filter(|msg| msg.kind() == Some(kind))
        .filter(|msg| msg.timestamp_ms().is_some_and(|ts| ts >= start_ms))
        .collect()
}
