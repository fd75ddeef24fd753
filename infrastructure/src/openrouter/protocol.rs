//! Wire types for the OpenAI-compatible chat completions API
//!
//! Only the fields the game needs are modelled. Unknown response fields are
//! ignored.

use imposter_domain::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /chat/completions` body
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    pub max_tokens: u32,
    pub response_format: ResponseFormat<'a>,
}

/// Structured output constraint
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub json_schema: JsonSchemaFormat<'a>,
}

impl<'a> ResponseFormat<'a> {
    pub fn strict_schema(name: &'a str, schema: &'a Value) -> Self {
        Self {
            kind: "json_schema",
            json_schema: JsonSchemaFormat {
                name,
                strict: true,
                schema,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchemaFormat<'a> {
    pub name: &'a str,
    pub strict: bool,
    pub schema: &'a Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Some providers return 200 with an error object
    pub error: Option<ApiError>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub code: Option<Value>,
}
