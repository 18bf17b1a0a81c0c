//! Anthropic Claude engine
//!
//! Sends one Messages API request per generation and parses the model's JSON
//! answer into a reply. Uses reqwest for HTTP.

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;

use super::{EngineError, Reply, SuggestionEngine, recent_history};
use crate::assistant::message::Message;
use crate::assistant::prompt::build_prompt;
use crate::assistant::reply_parser::parse_reply;

/// Anthropic API endpoint
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version header
const ANTHROPIC_VERSION: &str = "2023-06-01";

const ENGINE_NAME: &str = "Anthropic";

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Anthropic Claude engine
#[derive(Debug, Clone)]
pub struct AnthropicEngine {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    history_limit: usize,
}

impl AnthropicEngine {
    pub fn new(api_key: String, model: String, max_tokens: u32, history_limit: usize) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            max_tokens,
            history_limit,
        }
    }

    fn prompt(&self, utterance: &str, history: &[Message]) -> String {
        build_prompt(
            utterance,
            recent_history(history, utterance, self.history_limit),
        )
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        })
    }

    async fn call(&self, prompt: String) -> Result<Reply, EngineError> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(&prompt))
            .send()
            .await
            .map_err(|e| EngineError::Network {
                engine: ENGINE_NAME.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(EngineError::Api {
                engine: ENGINE_NAME.to_string(),
                code,
                message,
            });
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;

        parse_reply(&response_text(&body))
    }
}

/// Concatenate the text content of a Messages API response
fn response_text(body: &MessagesResponse) -> String {
    body.content
        .iter()
        .filter(|c| c.kind == "text")
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("")
}

impl SuggestionEngine for AnthropicEngine {
    fn generate<'a>(
        &'a self,
        utterance: &'a str,
        history: &'a [Message],
    ) -> BoxFuture<'a, Result<Reply, EngineError>> {
        let prompt = self.prompt(utterance, history);
        log::debug!("Anthropic prompt is {} bytes", prompt.len());
        Box::pin(self.call(prompt))
    }
}
