//! The classification-and-extraction pipeline: normalize an email,
//! classify it, and for event-worthy emails extract, repair, and
//! serialize a calendar event.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::ai::classifier::{Category, classify};
use crate::ai::extractor::extract;
use crate::calendar::{repair, serialize};
use crate::core::AppConfig;
use crate::email::NormalizedEmail;

/// The result of triaging one email. The only failure a caller ever
/// sees is "this email did not produce a calendar event"; nothing in
/// the pipeline aborts a run.
#[derive(Debug)]
pub enum TriageOutcome {
    /// The email describes an attendable occurrence and produced a
    /// calendar document ready for insertion.
    Event { document: String },
    /// The email was classified as something other than an event.
    Classified { category: Category },
    /// Classified as an event, but no structured record could be
    /// extracted. No calendar insertion should happen.
    ExtractionFailed,
}

/// Resolves the reference instant for relative-date resolution from
/// an email's Date header, falling back to the current instant when
/// the header is missing or unparseable.
pub fn reference_instant(date_header: Option<&str>) -> NaiveDateTime {
    date_header
        .and_then(|raw| {
            DateTime::parse_from_rfc2822(raw)
                .or_else(|_| DateTime::parse_from_rfc3339(raw))
                .ok()
        })
        .map(|dt| dt.naive_local())
        .unwrap_or_else(|| Local::now().naive_local())
}

/// Runs one email through the full pipeline.
///
/// Extraction only runs after the classifier resolves to
/// `Category::Event`; repair and serialization only run after
/// extraction succeeds. Each invocation owns its intermediate state,
/// so callers can iterate a batch and treat every email's outcome as
/// independent.
pub async fn triage_email(
    subject: &str,
    raw_body: &str,
    reference: NaiveDateTime,
    config: &AppConfig,
) -> TriageOutcome {
    let email = NormalizedEmail::new(subject, raw_body);

    let category = classify(&email, config).await;
    tracing::info!("Classified '{}' as {}", email.subject, category);

    if category != Category::Event {
        return TriageOutcome::Classified { category };
    }

    match extract(&email, reference, config).await {
        Ok(draft) => {
            let event = repair(draft);
            TriageOutcome::Event {
                document: serialize(&event),
            }
        }
        Err(err) => {
            tracing::warn!("Event extraction failed for '{}': {}", email.subject, err);
            TriageOutcome::ExtractionFailed
        }
    }
}
