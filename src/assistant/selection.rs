//! Selection of suggested blocks
//!
//! Suggested blocks from every assistant message are flattened into one list,
//! oldest message first. The selection is an index into that list.

use super::message::Message;

/// A suggested block addressed by its message and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionTarget {
    pub message_id: String,
    pub index: usize,
}

/// Flatten every suggested block in the conversation into targets
pub fn suggestion_targets(messages: &[Message]) -> Vec<SuggestionTarget> {
    messages
        .iter()
        .flat_map(|message| {
            (0..message.suggestions.blocks().len()).map(|index| SuggestionTarget {
                message_id: message.id.clone(),
                index,
            })
        })
        .collect()
}

/// Selection state for navigating suggested blocks
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_index: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_selection(&mut self) {
        self.selected_index = None;
    }

    pub fn get_selected(&self) -> Option<usize> {
        self.selected_index
    }

    /// Move to the next suggestion, wrapping to the first
    pub fn navigate_next(&mut self, suggestion_count: usize) {
        if suggestion_count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(current) => (current + 1) % suggestion_count,
            None => 0,
        });
    }

    /// Move to the previous suggestion, wrapping to the last
    pub fn navigate_previous(&mut self, suggestion_count: usize) {
        if suggestion_count == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(0) | None => suggestion_count - 1,
            Some(current) => current - 1,
        });
    }

    /// The selected target, if the selection is still in range
    pub fn target(&self, messages: &[Message]) -> Option<SuggestionTarget> {
        let index = self.selected_index?;
        suggestion_targets(messages).into_iter().nth(index)
    }
}
