//! HTTP endpoint engine
//!
//! Posts `{utterance, history}` to a configured URL that answers with
//! `{text, blocks}` directly, e.g. a backend route serving
//! `/api/ai/email-template`.

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Serialize;

use super::{EngineError, Reply, SuggestionEngine, recent_history};
use crate::assistant::message::{Message, Role};
use crate::assistant::reply_parser::parse_reply_value;

const ENGINE_NAME: &str = "Endpoint";

#[derive(Debug, Serialize)]
struct HistoryEntry<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct EndpointRequest<'a> {
    utterance: &'a str,
    history: Vec<HistoryEntry<'a>>,
}

/// Engine backed by a JSON HTTP endpoint
#[derive(Debug, Clone)]
pub struct EndpointEngine {
    client: Client,
    url: String,
    history_limit: usize,
}

impl EndpointEngine {
    pub fn new(url: String, history_limit: usize) -> Self {
        Self {
            client: Client::new(),
            url,
            history_limit,
        }
    }

    fn request<'a>(&self, utterance: &'a str, history: &'a [Message]) -> EndpointRequest<'a> {
        EndpointRequest {
            utterance,
            history: recent_history(history, utterance, self.history_limit)
                .iter()
                .map(|m| HistoryEntry {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
        }
    }

    async fn call(&self, request: EndpointRequest<'_>) -> Result<Reply, EngineError> {
        let response = self
            .client
            .post(&self.url)
            .json(&request)
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

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EngineError::Parse(e.to_string()))?;
        parse_reply_value(value)
    }
}

impl SuggestionEngine for EndpointEngine {
    fn generate<'a>(
        &'a self,
        utterance: &'a str,
        history: &'a [Message],
    ) -> BoxFuture<'a, Result<Reply, EngineError>> {
        Box::pin(self.call(self.request(utterance, history)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_keeps_only_recent_history() {
        let engine = EndpointEngine::new("http://localhost/api".into(), 2);
        let history = vec![
            Message::welcome(),
            Message::user("first"),
            Message::assistant("reply", Vec::new()),
        ];
        let request = engine.request("second", &history);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["utterance"], "second");
        assert_eq!(json["history"].as_array().unwrap().len(), 2);
        assert_eq!(json["history"][0]["role"], "user");
        assert_eq!(json["history"][0]["content"], "first");
        assert_eq!(json["history"][1]["role"], "assistant");
    }

    #[test]
    fn test_request_does_not_repeat_utterance_in_history() {
        let engine = EndpointEngine::new("http://localhost/api".into(), 10);
        let history = vec![Message::welcome(), Message::user("a product launch")];
        let json = serde_json::to_value(engine.request("a product launch", &history)).unwrap();
        assert_eq!(json["utterance"], "a product launch");
        assert_eq!(json["history"].as_array().unwrap().len(), 1);
        assert_eq!(json["history"][0]["role"], "assistant");
    }
}
