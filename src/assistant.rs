//! Email assistant
//!
//! A chat panel that turns requests into suggested content blocks and hands
//! accepted blocks to the template editor.

pub mod assistant_render;
pub mod conversation;
pub mod engine;
pub mod message;
pub mod panel;
pub mod prompt;
pub mod reply_parser;
pub mod selection;
pub mod worker;

pub use conversation::{ConversationSnapshot, ConversationStore};
pub use message::{Message, Role, Suggestions};
pub use panel::{AssistantPanel, CallbackHost};
pub use selection::SelectionState;
