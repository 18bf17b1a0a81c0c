//! Content block types

use serde::{Deserialize, Serialize};

/// Discriminator for the kind of content a block carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Title,
    Text,
    Button,
    Image,
    Divider,
    Spacer,
}

impl BlockKind {
    /// The `type` tag used in template files
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Title => "title",
            BlockKind::Text => "text",
            BlockKind::Button => "button",
            BlockKind::Image => "image",
            BlockKind::Divider => "divider",
            BlockKind::Spacer => "spacer",
        }
    }

    /// Parse a `type` tag, case-insensitively
    pub fn parse_kind(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" | "heading" => Some(BlockKind::Title),
            "text" | "paragraph" => Some(BlockKind::Text),
            "button" | "cta" => Some(BlockKind::Button),
            "image" => Some(BlockKind::Image),
            "divider" => Some(BlockKind::Divider),
            "spacer" => Some(BlockKind::Spacer),
            _ => None,
        }
    }
}

/// Type-dependent payload of a block
///
/// Serialized with an internal `type` tag so a block reads as
/// `{"id": "...", "type": "button", "label": "Shop Now", "href": "#"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockPayload {
    Title { content: String },
    Text { content: String },
    Button { label: String, href: String },
    Image { src: String, alt: String },
    Divider,
    Spacer { height: u16 },
}

/// A single block of an email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: String,
    #[serde(flatten)]
    pub payload: BlockPayload,
}

impl ContentBlock {
    pub fn kind(&self) -> BlockKind {
        match self.payload {
            BlockPayload::Title { .. } => BlockKind::Title,
            BlockPayload::Text { .. } => BlockKind::Text,
            BlockPayload::Button { .. } => BlockKind::Button,
            BlockPayload::Image { .. } => BlockKind::Image,
            BlockPayload::Divider => BlockKind::Divider,
            BlockPayload::Spacer { .. } => BlockKind::Spacer,
        }
    }

    /// One-line text shown next to the block's type tag
    ///
    /// Text-bearing blocks show their text; the rest show their type name.
    pub fn summary(&self) -> &str {
        match &self.payload {
            BlockPayload::Title { content } | BlockPayload::Text { content } => content,
            BlockPayload::Button { label, .. } => label,
            BlockPayload::Image { alt, .. } if !alt.is_empty() => alt,
            _ => self.kind().as_str(),
        }
    }

    /// Copy of this block carrying a different id
    pub fn with_id(&self, id: String) -> ContentBlock {
        ContentBlock {
            id,
            payload: self.payload.clone(),
        }
    }
}
