//! mailsmith library - terminal email template builder with an AI assistant
//!
//! Exposes the conversation store, suggestion engines and template editor so
//! they can be embedded and tested without the terminal UI.

pub mod app;
pub mod assistant;
pub mod blocks;
pub mod config;
pub mod error;
pub mod ids;
pub mod input;
pub mod notification;
pub mod template;
pub mod theme;

#[cfg(test)]
pub mod test_utils;
pub mod widgets;

pub use app::{App, Focus};
pub use config::Config;
