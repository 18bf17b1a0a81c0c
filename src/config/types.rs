// Configuration type definitions

use serde::Deserialize;

use super::assistant_types::AssistantConfig;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
}
