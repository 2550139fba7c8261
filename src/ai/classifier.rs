//! Assigns one of four fixed categories to an email via a
//! schema-constrained model call.

use std::fmt;

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::ai::prompt::{Prompt, templates};
use crate::core::AppConfig;
use crate::email::NormalizedEmail;
use crate::openai::{Message, ResponseFormat, Role, completion, message_content};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Important,
    Event,
    Opportunity,
    Unimportant,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// The model is asked for a one-sentence reasoning field before the
// label. The reasoning never leaves this module; it exists to steer
// the model, not to inform the caller.
#[derive(Deserialize)]
struct CategorizeResponse {
    #[allow(dead_code)]
    reasoning: String,
    category: Category,
}

fn category_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "reasoning": {
                "type": "string",
                "description": "One sentence explaining the classification."
            },
            "category": {
                "type": "string",
                "enum": ["Important", "Event", "Opportunity", "Unimportant"]
            }
        },
        "required": ["reasoning", "category"],
        "additionalProperties": false
    })
}

/// Classifies an email into exactly one `Category`.
///
/// Never fails: an unreachable model, a malformed response, or a
/// label outside the enumerated set all resolve to
/// `Category::Unimportant` so one bad email can't abort a batch.
pub async fn classify(email: &NormalizedEmail, config: &AppConfig) -> Category {
    match try_classify(email, config).await {
        Ok(category) => category,
        Err(err) => {
            tracing::warn!(
                "Classification failed for '{}', defaulting to Unimportant: {}",
                email.subject,
                err
            );
            Category::Unimportant
        }
    }
}

async fn try_classify(email: &NormalizedEmail, config: &AppConfig) -> Result<Category, Error> {
    let registry = templates();
    let prompt = registry.render(
        &Prompt::Categorize.to_string(),
        &json!({"email": email.prompt_text(config.classify_input_limit)}),
    )?;

    let messages = vec![
        Message::new(Role::System, "You are an intelligent email assistant."),
        Message::new(Role::User, &prompt),
    ];
    let format = ResponseFormat::json_schema("email_category", category_schema());

    let response = completion(
        &messages,
        Some(format),
        &config.openai_api_hostname,
        &config.openai_api_key,
        &config.openai_model,
    )
    .await?;

    let content = message_content(&response)?;
    let parsed: CategorizeResponse = serde_json::from_str(content)?;
    Ok(parsed.category)
}
