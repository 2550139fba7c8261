//! Enforces temporal invariants on extracted event drafts.
//!
//! The extraction prompt asks the model for sane timestamps, but a
//! prompt is a request, not a guarantee. This module is the one place
//! where "end strictly after start" is mechanically true.

use chrono::{DateTime, Duration, Local, NaiveDateTime};

use crate::ai::extractor::EventDraft;

/// An event draft after repair. Invariants: `end > start`, `title` is
/// non-empty, `location` and `description` are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub description: String,
}

// Models routinely append a Z or an offset despite being asked for
// bare ISO 8601, so accept RFC 3339 too and keep the wall-clock
// reading.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Repairs a draft using the current instant for the fallback window.
pub fn repair(draft: EventDraft) -> ValidatedEvent {
    repair_at(draft, Local::now().naive_local())
}

/// Repairs a draft into a structurally valid event. Total: always
/// returns a usable event, whatever the model emitted.
///
/// If either timestamp fails to parse, both are discarded for a
/// fallback window of `now` to `now + 1h`. If both parse but the end
/// is not after the start, the start is kept and the end becomes
/// `start + 1h`. The one-hour default is the single repair rule,
/// applied the same way for a missing end and an impossible ordering.
pub fn repair_at(draft: EventDraft, now: NaiveDateTime) -> ValidatedEvent {
    let one_hour = Duration::hours(1);

    let (start, end) = match (
        parse_timestamp(&draft.start.date_time),
        parse_timestamp(&draft.end.date_time),
    ) {
        (Some(start), Some(end)) if end > start => (start, end),
        (Some(start), Some(end)) => {
            tracing::debug!(
                "Repairing event '{}': end {} is not after start {}",
                draft.title,
                end,
                start
            );
            (start, start + one_hour)
        }
        _ => {
            tracing::debug!(
                "Repairing event '{}': unparseable timestamps '{}' / '{}'",
                draft.title,
                draft.start.date_time,
                draft.end.date_time
            );
            (now, now + one_hour)
        }
    };

    let title = if draft.title.trim().is_empty() {
        String::from("Untitled event")
    } else {
        draft.title.trim().to_string()
    };

    ValidatedEvent {
        title,
        start,
        end,
        location: draft.location.unwrap_or_default(),
        description: draft.description.unwrap_or_default(),
    }
}
