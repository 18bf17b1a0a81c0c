//! Email content blocks
//!
//! Blocks are the unit of an email template. The factory functions are the only
//! place that mints block ids; everything else passes blocks through untouched.

mod block;
pub mod factory;

pub use block::{BlockKind, BlockPayload, ContentBlock};
pub use factory::{
    create_button_block, create_divider_block, create_image_block, create_spacer_block,
    create_text_block, create_title_block,
};
