//! Assistant panel
//!
//! Glues the conversation store to the host template editor. The panel is
//! built with the host's two mutation entry points and a read-only snapshot
//! of the current template; it never touches the template directly.

use std::collections::HashSet;

use super::conversation::ConversationStore;
use super::message::Message;
use crate::blocks::ContentBlock;
use crate::ids::generate_id;
use crate::template::{EmailTemplate, TemplateHost};

/// Adapts a pair of closures to [`TemplateHost`]
pub struct CallbackHost<A, S>
where
    A: FnMut(ContentBlock),
    S: FnMut(Vec<ContentBlock>),
{
    on_add_block: A,
    on_set_template: S,
}

impl<A, S> CallbackHost<A, S>
where
    A: FnMut(ContentBlock),
    S: FnMut(Vec<ContentBlock>),
{
    pub fn new(on_add_block: A, on_set_template: S) -> Self {
        Self {
            on_add_block,
            on_set_template,
        }
    }
}

impl<A, S> TemplateHost for CallbackHost<A, S>
where
    A: FnMut(ContentBlock),
    S: FnMut(Vec<ContentBlock>),
{
    fn on_add_block(&mut self, block: ContentBlock) {
        (self.on_add_block)(block)
    }

    fn on_set_template(&mut self, blocks: Vec<ContentBlock>) {
        (self.on_set_template)(blocks)
    }
}

/// The assistant panel: a conversation plus the bridge to the template editor
pub struct AssistantPanel<H: TemplateHost> {
    store: ConversationStore,
    host: H,
    template: EmailTemplate,
    /// Ids of blocks already handed to the host this session
    handed_out: HashSet<String>,
}

impl<H: TemplateHost> AssistantPanel<H> {
    pub fn new(store: ConversationStore, host: H, template: EmailTemplate) -> Self {
        Self {
            store,
            host,
            template,
            handed_out: HashSet::new(),
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The read-only template snapshot used for context
    pub fn template(&self) -> &EmailTemplate {
        &self.template
    }

    /// Replace the template snapshot after the host changed the template
    pub fn set_template_snapshot(&mut self, template: EmailTemplate) {
        self.template = template;
    }

    /// Submit an utterance to the conversation
    pub fn submit(&mut self, utterance: &str) -> bool {
        self.store.submit(utterance)
    }

    /// Reset the conversation to its welcome message
    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// Ask the host to append one block
    ///
    /// The block is forwarded unchanged unless its id is already in the
    /// template or was handed out earlier, in which case a copy with a fresh
    /// id is forwarded so template ids stay unique.
    pub fn add_block(&mut self, block: &ContentBlock) {
        let block = if self.template.contains_block_id(&block.id)
            || self.handed_out.contains(&block.id)
        {
            let copy = block.with_id(generate_id());
            log::debug!("Block id {} already used, adding as {}", block.id, copy.id);
            copy
        } else {
            block.clone()
        };

        self.handed_out.insert(block.id.clone());
        log::debug!("Adding {} block {}", block.kind().as_str(), block.id);
        self.host.on_add_block(block);
    }

    /// Ask the host to replace the whole template with `blocks`, in order
    pub fn apply_all(&mut self, blocks: &[ContentBlock]) {
        log::debug!("Replacing template with {} blocks", blocks.len());
        self.handed_out = blocks.iter().map(|b| b.id.clone()).collect();
        self.host.on_set_template(blocks.to_vec());
    }

    /// Add the `index`-th suggested block of an assistant message
    ///
    /// Returns false if the message or block does not exist.
    pub fn add_suggested_block(&mut self, message_id: &str, index: usize) -> bool {
        let Some(block) = self
            .suggestion_message(message_id)
            .and_then(|m| m.suggestions.blocks().get(index))
            .cloned()
        else {
            return false;
        };
        self.add_block(&block);
        true
    }

    /// Replace the template with every block suggested by an assistant message
    ///
    /// Returns false if the message has no suggestions.
    pub fn apply_suggestions(&mut self, message_id: &str) -> bool {
        let Some(blocks) = self
            .suggestion_message(message_id)
            .map(|m| m.suggestions.blocks().to_vec())
        else {
            return false;
        };
        self.apply_all(&blocks);
        true
    }

    fn suggestion_message(&self, message_id: &str) -> Option<&Message> {
        self.store
            .find_message(message_id)
            .filter(|m| m.has_suggestions())
    }
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod panel_tests;
