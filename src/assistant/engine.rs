//! Suggestion engines
//!
//! A suggestion engine turns a user utterance (plus the conversation so far)
//! into an assistant reply: display text and zero or more proposed blocks.
//! The default engine is a keyword heuristic; remote engines call out over
//! HTTP but keep the same one-shot contract.

use futures::future::BoxFuture;
use thiserror::Error;

use super::message::{Message, Role};
use crate::blocks::ContentBlock;
use crate::config::assistant_types::{AssistantConfig, EngineType};

mod anthropic;
mod endpoint;
pub mod heuristic;

pub use anthropic::AnthropicEngine;
pub use endpoint::EndpointEngine;
pub use heuristic::HeuristicEngine;

/// Errors that can occur while generating a reply
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Engine is missing required configuration
    #[error("[{engine}] not configured: {message}")]
    NotConfigured { engine: String, message: String },

    /// Network error while contacting a remote engine
    #[error("[{engine}] Network error: {message}")]
    Network { engine: String, message: String },

    /// Remote engine returned an error response
    #[error("[{engine}] API error ({code}): {message}")]
    Api {
        engine: String,
        code: u16,
        message: String,
    },

    /// Reply could not be turned into text and blocks
    #[error("Malformed reply: {0}")]
    Parse(String),

    /// Generation took longer than the configured timeout
    #[error("Generation timed out after {0} ms")]
    Timeout(u64),

    /// Generation was cancelled before it resolved
    #[error("Generation cancelled")]
    Cancelled,

    /// The worker thread panicked
    #[error("Suggestion worker crashed: {0}")]
    WorkerCrashed(String),
}

/// An assistant reply produced by an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub blocks: Vec<ContentBlock>,
}

impl Reply {
    pub fn new(text: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        Self {
            text: text.into(),
            blocks,
        }
    }
}

/// Maps an utterance to a reply
///
/// Implementations may take a while (network calls); the conversation store
/// always runs them off the UI thread and resolves each call exactly once.
pub trait SuggestionEngine: Send + Sync {
    fn generate<'a>(
        &'a self,
        utterance: &'a str,
        history: &'a [Message],
    ) -> BoxFuture<'a, Result<Reply, EngineError>>;
}

/// Display name of the configured engine
pub fn engine_name(engine: EngineType) -> &'static str {
    match engine {
        EngineType::Heuristic => "Heuristic",
        EngineType::Anthropic => "Anthropic",
        EngineType::Endpoint => "Endpoint",
    }
}

fn require<'a>(
    value: &'a Option<String>,
    engine: EngineType,
    message: &str,
) -> Result<&'a String, EngineError> {
    value
        .as_ref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| EngineError::NotConfigured {
            engine: engine_name(engine).to_string(),
            message: message.to_string(),
        })
}

/// Create the engine selected in the configuration
///
/// Returns an error if a remote engine is missing required settings.
pub fn from_config(config: &AssistantConfig) -> Result<Box<dyn SuggestionEngine>, EngineError> {
    match config.engine {
        EngineType::Heuristic => Ok(Box::new(HeuristicEngine::new(config.reply_delay()))),
        EngineType::Anthropic => {
            let api_key = require(
                &config.anthropic.api_key,
                EngineType::Anthropic,
                "Missing API key. Add 'api_key' in [assistant.anthropic] section.",
            )?;
            let model = require(
                &config.anthropic.model,
                EngineType::Anthropic,
                "Missing model. Add 'model' in [assistant.anthropic] section (e.g., 'claude-haiku-4-5-20251001').",
            )?;
            Ok(Box::new(AnthropicEngine::new(
                api_key.clone(),
                model.clone(),
                config.anthropic.max_tokens,
                config.history_limit,
            )))
        }
        EngineType::Endpoint => {
            let url = require(
                &config.endpoint.url,
                EngineType::Endpoint,
                "Missing URL. Add 'url' in [assistant.endpoint] section.",
            )?;
            Ok(Box::new(EndpointEngine::new(
                url.clone(),
                config.history_limit,
            )))
        }
    }
}

/// The last `limit` messages that precede `utterance`, oldest first
///
/// The store's log already ends with the utterance as a user message;
/// engines send the utterance separately, so that message is dropped here.
pub(crate) fn recent_history<'a>(
    history: &'a [Message],
    utterance: &str,
    limit: usize,
) -> &'a [Message] {
    let prior = match history.split_last() {
        Some((last, rest)) if last.role == Role::User && last.content == utterance.trim() => rest,
        _ => history,
    };
    &prior[prior.len().saturating_sub(limit)..]
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
