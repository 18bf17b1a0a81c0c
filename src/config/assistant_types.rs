// Assistant configuration type definitions

use std::time::Duration;

use serde::Deserialize;

/// Default artificial latency of the heuristic engine in milliseconds
fn default_reply_delay_ms() -> u64 {
    1500
}

/// Default number of recent messages sent to remote engines as context
fn default_history_limit() -> usize {
    10
}

/// Default max tokens for Anthropic replies
fn default_max_tokens() -> u32 {
    1024
}

/// Suggestion engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    #[default]
    Heuristic,
    Anthropic,
    Endpoint,
}

/// Anthropic-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    /// API key for Anthropic (required when the anthropic engine is selected)
    pub api_key: Option<String>,
    /// Model to use (required - user must specify)
    pub model: Option<String>,
    /// Maximum tokens in response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        AnthropicConfig {
            api_key: None,
            model: None,
            max_tokens: default_max_tokens(),
        }
    }
}

/// Custom HTTP endpoint configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EndpointConfig {
    /// URL that accepts `{utterance, history}` and answers `{text, blocks}`
    pub url: Option<String>,
}

/// Assistant configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Which suggestion engine to use
    #[serde(default)]
    pub engine: EngineType,
    /// Artificial latency of the heuristic engine
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    /// Optional upper bound on a single generation
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Number of recent messages sent to remote engines
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        AssistantConfig {
            engine: EngineType::default(),
            reply_delay_ms: default_reply_delay_ms(),
            timeout_ms: None,
            history_limit: default_history_limit(),
            anthropic: AnthropicConfig::default(),
            endpoint: EndpointConfig::default(),
        }
    }
}

impl AssistantConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Generation timeout; zero is treated as no timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}
