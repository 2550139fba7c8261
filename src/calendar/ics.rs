//! Renders a validated event as an iCalendar document with a single
//! VEVENT block, ready to hand to a calendar-insertion client.

use chrono::Utc;
use uuid::Uuid;

use crate::calendar::event::ValidatedEvent;

// ICS content lines are CRLF-terminated and text values are
// single-line. A literal newline inside SUMMARY or DESCRIPTION
// corrupts the document, so it becomes the \n escape sequence along
// with the other RFC 5545 specials.
fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace("\r\n", "\\n")
        .replace('\n', "\\n")
        .replace('\r', "\\n")
}

/// Serializes a validated event into an iCalendar document.
///
/// Content is deterministic given the event; the UID and DTSTAMP are
/// fresh per call so two documents for the same event are distinct
/// calendar entries.
pub fn serialize(event: &ValidatedEvent) -> String {
    let uid = Uuid::new_v4();
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ");

    format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//mailtriage//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{start}\r\n\
         DTEND:{end}\r\n\
         SUMMARY:{summary}\r\n\
         LOCATION:{location}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n",
        uid = uid,
        dtstamp = dtstamp,
        start = event.start.format("%Y%m%dT%H%M%S"),
        end = event.end.format("%Y%m%dT%H%M%S"),
        summary = escape_text(&event.title),
        location = escape_text(&event.location),
        description = escape_text(&event.description),
    )
}
