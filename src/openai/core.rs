use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Message {
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    refusal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            refusal: None,
            content: Some(content.to_string()),
        }
    }
}

/// A `json_schema` response format constraint. This is the only
/// structural guarantee the model boundary offers: the request tells
/// the model exactly what shape to emit, and anything that still
/// comes back malformed is the caller's parse failure to handle.
#[derive(Serialize, Debug)]
pub struct ResponseFormat {
    pub r#type: String,
    pub json_schema: JsonSchema,
}

#[derive(Serialize, Debug)]
pub struct JsonSchema {
    pub name: String,
    pub strict: bool,
    pub schema: Value,
}

impl ResponseFormat {
    pub fn json_schema(name: &str, schema: Value) -> Self {
        Self {
            r#type: String::from("json_schema"),
            json_schema: JsonSchema {
                name: name.to_string(),
                strict: true,
                schema,
            },
        }
    }
}

/// Requests a chat completion from an OpenAI compatible API.
///
/// Temperature is pinned to zero: every call this crate makes asks
/// for deterministic structured output, not creative prose. A timeout
/// bounds how long one email can stall a batch; a timed-out call
/// surfaces as an `Err` like any other transport failure.
pub async fn completion(
    messages: &Vec<Message>,
    response_format: Option<ResponseFormat>,
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, Error> {
    let mut payload = json!({
        "model": model,
        "messages": messages,
        "temperature": 0,
    });
    if let Some(response_format) = response_format {
        payload["response_format"] = json!(response_format);
    }
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .timeout(Duration::from_secs(60 * 2))
        .json(&payload)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(response)
}

/// Pulls the assistant message content out of a completion response.
pub fn message_content(response: &Value) -> Result<&str, Error> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow!("No message content in response: {}", response))
}
