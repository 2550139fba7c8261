//! Extracts a structured event record from an email via a
//! schema-constrained model call.

use anyhow::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ai::prompt::{Prompt, templates};
use crate::core::AppConfig;
use crate::email::NormalizedEmail;
use crate::openai::{Message, ResponseFormat, Role, completion, message_content};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDateTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// The model's raw event record. Untrusted: timestamps may be
/// unparseable and `end` may not be after `start`. Only
/// `calendar::event::repair` turns this into something schedulable.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn event_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "reasoning": {
                "type": "string",
                "description": "A brief explanation of the event details extracted."
            },
            "title": {
                "type": "string",
                "description": "A concise, specific event title of 3-7 words."
            },
            "start": {
                "type": "object",
                "properties": {
                    "dateTime": {
                        "type": "string",
                        "description": "Start as an ISO 8601 string (YYYY-MM-DDTHH:MM:SS)."
                    },
                    "timeZone": {"type": "string"}
                },
                "required": ["dateTime", "timeZone"],
                "additionalProperties": false
            },
            "end": {
                "type": "object",
                "properties": {
                    "dateTime": {
                        "type": "string",
                        "description": "End as an ISO 8601 string, never equal to the start."
                    },
                    "timeZone": {"type": "string"}
                },
                "required": ["dateTime", "timeZone"],
                "additionalProperties": false
            },
            "location": {
                "type": ["string", "null"],
                "description": "Physical place or video link, if any."
            },
            "description": {
                "type": "string",
                "description": "Agenda and participants pulled from the email."
            }
        },
        "required": ["reasoning", "title", "start", "end", "location", "description"],
        "additionalProperties": false
    })
}

/// Asks the model for a structured event record from an email.
///
/// The reference instant is rendered into the prompt so relative
/// phrases ("tomorrow", "next Friday") resolve against the email's
/// own date and not the moment this pipeline happens to run. Any
/// transport or parse failure is the "extraction failed" outcome and
/// the caller must skip calendar output for this email.
pub async fn extract(
    email: &NormalizedEmail,
    reference: NaiveDateTime,
    config: &AppConfig,
) -> Result<EventDraft, Error> {
    let registry = templates();
    let prompt = registry.render(
        &Prompt::ExtractEvent.to_string(),
        &json!({
            "email": email.prompt_text(config.extract_input_limit),
            "date_context": reference.format("%A %Y-%m-%d %H:%M:%S").to_string(),
        }),
    )?;

    let messages = vec![
        Message::new(Role::System, "You are an intelligent calendar assistant."),
        Message::new(Role::User, &prompt),
    ];
    let format = ResponseFormat::json_schema("calendar_event", event_schema());

    let response = completion(
        &messages,
        Some(format),
        &config.openai_api_hostname,
        &config.openai_api_key,
        &config.openai_model,
    )
    .await?;

    let content = message_content(&response)?;
    let draft: EventDraft = serde_json::from_str(content)?;
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_config(hostname: &str) -> AppConfig {
        AppConfig {
            openai_api_hostname: hostname.to_string(),
            openai_api_key: "test-key".to_string(),
            openai_model: "gpt-4".to_string(),
            classify_input_limit: 3000,
            extract_input_limit: 4000,
        }
    }

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn completion_body(content: &str) -> String {
        json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
        .to_string()
    }

    #[test]
    fn test_event_draft_deserialization() {
        let json = r#"{
            "reasoning": "Kickoff on Friday afternoon.",
            "title": "Hackathon Kickoff",
            "start": {"dateTime": "2024-03-15T15:00:00", "timeZone": "America/New_York"},
            "end": {"dateTime": "2024-03-15T16:00:00", "timeZone": "America/New_York"},
            "location": "Student Union",
            "description": "Bring a laptop."
        }"#;
        let draft: EventDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.title, "Hackathon Kickoff");
        assert_eq!(draft.start.date_time, "2024-03-15T15:00:00");
        assert_eq!(draft.location.as_deref(), Some("Student Union"));
    }

    #[test]
    fn test_event_draft_null_location() {
        let json = r#"{
            "title": "Team Sync",
            "start": {"dateTime": "2024-03-12T10:00:00"},
            "end": {"dateTime": "2024-03-12T10:30:00"},
            "location": null,
            "description": "Weekly sync."
        }"#;
        let draft: EventDraft = serde_json::from_str(json).unwrap();
        assert!(draft.location.is_none());
        assert!(draft.start.time_zone.is_none());
    }

    #[tokio::test]
    async fn test_extract_parses_draft() {
        let mut server = mockito::Server::new_async().await;
        let content = r#"{"reasoning":"Friday kickoff, one hour by default.","title":"Hackathon Kickoff","start":{"dateTime":"2024-03-15T15:00:00","timeZone":"America/New_York"},"end":{"dateTime":"2024-03-15T16:00:00","timeZone":"America/New_York"},"location":"Student Union","description":"Bring a laptop."}"#;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(content))
            .create();

        let email = NormalizedEmail::new(
            "Hackathon kickoff",
            "Join us for the Hackathon kickoff this Friday 3pm at the Student Union, bring a laptop",
        );
        let draft = extract(&email, reference(), &test_config(&server.url()))
            .await
            .unwrap();

        mock.assert();
        assert_eq!(draft.title, "Hackathon Kickoff");
        assert_eq!(draft.end.date_time, "2024-03-15T16:00:00");
    }

    #[tokio::test]
    async fn test_extract_sends_reference_instant() {
        let mut server = mockito::Server::new_async().await;
        let content = r#"{"title":"X","start":{"dateTime":"2024-03-12T10:00:00"},"end":{"dateTime":"2024-03-12T11:00:00"},"description":"x"}"#;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_body(mockito::Matcher::Regex(
                "Monday 2024-03-11 09:00:00".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(content))
            .create();

        let email = NormalizedEmail::new("Sync", "Tomorrow at 10am");
        let result = extract(&email, reference(), &test_config(&server.url())).await;

        mock.assert();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_extract_fails_on_non_json_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("I could not find an event in this email."))
            .create();

        let email = NormalizedEmail::new("Re: hey", "no event here");
        let result = extract(&email, reference(), &test_config(&server.url())).await;

        mock.assert();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_extract_fails_on_server_error() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(500)
            .with_body("boom")
            .create();

        let email = NormalizedEmail::new("Sync", "Tomorrow at 10am");
        let result = extract(&email, reference(), &test_config(&server.url())).await;

        mock.assert();
        assert!(result.is_err());
    }
}
