//! Block constructors
//!
//! Each constructor mints a fresh id.

use super::block::{BlockPayload, ContentBlock};
use crate::ids::generate_id;

/// Default height of a spacer block, in pixels
pub const DEFAULT_SPACER_HEIGHT: u16 = 20;

fn block(payload: BlockPayload) -> ContentBlock {
    ContentBlock {
        id: generate_id(),
        payload,
    }
}

pub fn create_title_block(content: impl Into<String>) -> ContentBlock {
    block(BlockPayload::Title {
        content: content.into(),
    })
}

pub fn create_text_block(content: impl Into<String>) -> ContentBlock {
    block(BlockPayload::Text {
        content: content.into(),
    })
}

pub fn create_button_block(label: impl Into<String>, href: impl Into<String>) -> ContentBlock {
    block(BlockPayload::Button {
        label: label.into(),
        href: href.into(),
    })
}

pub fn create_image_block(src: impl Into<String>, alt: impl Into<String>) -> ContentBlock {
    block(BlockPayload::Image {
        src: src.into(),
        alt: alt.into(),
    })
}

pub fn create_divider_block() -> ContentBlock {
    block(BlockPayload::Divider)
}

pub fn create_spacer_block(height: u16) -> ContentBlock {
    block(BlockPayload::Spacer { height })
}
