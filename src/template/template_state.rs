//! Email template document

use serde::{Deserialize, Serialize};

use crate::blocks::ContentBlock;
use crate::ids::generate_id;

/// An email template: metadata plus an ordered list of blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    #[serde(default = "generate_id")]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

fn default_name() -> String {
    "Untitled".to_string()
}

impl Default for EmailTemplate {
    fn default() -> Self {
        Self::untitled()
    }
}

impl EmailTemplate {
    /// Empty template used when no file is given
    pub fn untitled() -> Self {
        Self {
            id: generate_id(),
            name: default_name(),
            subject: String::new(),
            blocks: Vec::new(),
        }
    }

    pub fn contains_block_id(&self, id: &str) -> bool {
        self.blocks.iter().any(|b| b.id == id)
    }

    /// One line per block: `type: summary`
    pub fn outline(&self) -> Vec<String> {
        self.blocks
            .iter()
            .map(|b| format!("{}: {}", b.kind().as_str(), b.summary()))
            .collect()
    }
}
