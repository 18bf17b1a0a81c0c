//! Conversation messages

use serde::Serialize;

use crate::blocks::ContentBlock;
use crate::ids::generate_id;

/// Id of the seed message every conversation starts with
pub const WELCOME_MESSAGE_ID: &str = "welcome";

pub const WELCOME_TEXT: &str = "Hi! I'm your Email AI Assistant. I can help you build beautiful newsletters. Just tell me what you need, for example: 'Create a welcome email for a tech newsletter' or 'Add a product section about new sneakers'.";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Blocks proposed by an assistant message
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum Suggestions {
    #[default]
    None,
    Blocks(Vec<ContentBlock>),
}

impl Suggestions {
    /// The proposed blocks; empty for `None`
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            Suggestions::None => &[],
            Suggestions::Blocks(blocks) => blocks,
        }
    }

    /// True when there is nothing to show, whether absent or an empty list
    pub fn is_empty(&self) -> bool {
        self.blocks().is_empty()
    }
}

/// One entry of the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Suggestions::is_empty")]
    pub suggestions: Suggestions,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            role: Role::User,
            content: content.into(),
            suggestions: Suggestions::None,
        }
    }

    pub fn assistant(content: impl Into<String>, blocks: Vec<ContentBlock>) -> Self {
        Self {
            id: generate_id(),
            role: Role::Assistant,
            content: content.into(),
            suggestions: Suggestions::Blocks(blocks),
        }
    }

    /// The welcome message a fresh conversation is seeded with
    pub fn welcome() -> Self {
        Self {
            id: WELCOME_MESSAGE_ID.to_string(),
            role: Role::Assistant,
            content: WELCOME_TEXT.to_string(),
            suggestions: Suggestions::None,
        }
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}
