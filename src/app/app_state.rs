use crate::assistant::selection::suggestion_targets;
use crate::assistant::{AssistantPanel, ConversationStore, SelectionState};
use crate::input::InputState;
use crate::notification::NotificationState;
use crate::template::{EmailTemplate, TemplateEditor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    InputField,
    Suggestions,
}

pub struct App {
    pub panel: AssistantPanel<TemplateEditor>,
    pub input: InputState,
    pub focus: Focus,
    pub selection: SelectionState,
    /// Message whose suggestions wait for apply-all confirmation
    pub pending_apply: Option<String>,
    pub notification: NotificationState,
    pub should_quit: bool,
}

impl App {
    pub fn new(editor: TemplateEditor) -> Self {
        Self::with_store(editor, ConversationStore::new())
    }

    pub fn with_store(editor: TemplateEditor, store: ConversationStore) -> Self {
        let snapshot = editor.template().clone();
        Self {
            panel: AssistantPanel::new(store, editor, snapshot),
            input: InputState::new(),
            focus: Focus::InputField,
            selection: SelectionState::new(),
            pending_apply: None,
            notification: NotificationState::new(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn template(&self) -> &EmailTemplate {
        self.panel.host().template()
    }

    pub fn editor(&self) -> &TemplateEditor {
        self.panel.host()
    }

    pub fn is_generating(&self) -> bool {
        self.panel.store().is_generating()
    }

    pub fn suggestion_count(&self) -> usize {
        suggestion_targets(self.panel.store().messages()).len()
    }

    /// Drain engine responses into the conversation
    pub fn poll_conversation(&mut self) -> bool {
        self.panel.store_mut().poll()
    }

    /// Submit the input text; the field is cleared only if it was accepted
    pub fn submit_input(&mut self) {
        let text = self.input.text().to_string();
        if self.panel.submit(&text) {
            self.input.clear();
        }
    }

    pub fn reset_conversation(&mut self) {
        self.panel.reset();
        self.selection.clear_selection();
        self.pending_apply = None;
        self.notification.show("Conversation reset");
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::InputField => Focus::Suggestions,
            Focus::Suggestions => Focus::InputField,
        };
    }

    pub fn select_next(&mut self) {
        let count = self.suggestion_count();
        self.selection.navigate_next(count);
    }

    pub fn select_previous(&mut self) {
        let count = self.suggestion_count();
        self.selection.navigate_previous(count);
    }

    /// Add the selected suggested block to the template
    pub fn add_selected_block(&mut self) {
        let Some(target) = self.selection.target(self.panel.store().messages()) else {
            return;
        };
        if self.panel.add_suggested_block(&target.message_id, target.index) {
            self.sync_template_snapshot();
            self.notification.show("Block added");
        }
    }

    /// Ask for confirmation before replacing the template
    pub fn request_apply_all(&mut self) {
        if let Some(target) = self.selection.target(self.panel.store().messages()) {
            self.pending_apply = Some(target.message_id);
        }
    }

    pub fn confirm_apply_all(&mut self) {
        let Some(message_id) = self.pending_apply.take() else {
            return;
        };
        if self.panel.apply_suggestions(&message_id) {
            self.sync_template_snapshot();
            self.notification.show("Template replaced");
        }
    }

    pub fn cancel_apply_all(&mut self) {
        self.pending_apply = None;
    }

    pub fn save_template(&mut self) {
        if self.editor().path().is_none() {
            self.notification
                .show_warning("No template file to save to; pass one on the command line");
            return;
        }

        match self.panel.host_mut().save() {
            Ok(path) => {
                let message = format!("Saved to {}", path.display());
                self.notification.show(&message);
            }
            Err(e) => {
                log::error!("Save failed: {}", e);
                self.notification.show_error(&e.to_string());
            }
        }
    }

    fn sync_template_snapshot(&mut self) {
        let snapshot = self.panel.host().template().clone();
        self.panel.set_template_snapshot(snapshot);
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
