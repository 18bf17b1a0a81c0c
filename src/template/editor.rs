//! Template editor: owner of the canonical template document

use std::fs;
use std::path::{Path, PathBuf};

use super::template_state::EmailTemplate;
use crate::blocks::ContentBlock;
use crate::error::MailsmithError;

/// The two mutation entry points the assistant may call
///
/// Both are fire-and-forget: the caller does not reconcile a result and
/// never rolls back.
pub trait TemplateHost {
    /// Append exactly one block to the end of the template
    fn on_add_block(&mut self, block: ContentBlock);

    /// Replace the whole block list with `blocks`, in order
    fn on_set_template(&mut self, blocks: Vec<ContentBlock>);
}

/// Holds the template being edited and the file it came from
#[derive(Debug, Clone)]
pub struct TemplateEditor {
    template: EmailTemplate,
    path: Option<PathBuf>,
    dirty: bool,
}

impl TemplateEditor {
    pub fn new(template: EmailTemplate) -> Self {
        Self {
            template,
            path: None,
            dirty: false,
        }
    }

    /// Load a template from a JSON file
    pub fn load(path: &Path) -> Result<Self, MailsmithError> {
        let contents = fs::read_to_string(path).map_err(|source| MailsmithError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        let template = serde_json::from_str::<EmailTemplate>(&contents).map_err(|source| {
            MailsmithError::InvalidTemplate {
                path: path.to_path_buf(),
                source,
            }
        })?;

        #[cfg(debug_assertions)]
        log::debug!(
            "Loaded template {:?} with {} blocks from {:?}",
            template.name,
            template.blocks.len(),
            path
        );

        Ok(Self {
            template,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Write the template back to the file it was loaded from
    pub fn save(&mut self) -> Result<&Path, MailsmithError> {
        let path = self.path.as_deref().ok_or(MailsmithError::NoTemplatePath)?;
        fs::write(path, self.to_json()?)?;
        self.dirty = false;
        Ok(path)
    }

    pub fn to_json(&self) -> Result<String, MailsmithError> {
        Ok(serde_json::to_string_pretty(&self.template)?)
    }

    pub fn template(&self) -> &EmailTemplate {
        &self.template
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the template changed since it was loaded or last saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn append_block(&mut self, block: ContentBlock) {
        self.template.blocks.push(block);
        self.dirty = true;
    }

    pub fn replace_blocks(&mut self, blocks: Vec<ContentBlock>) {
        self.template.blocks = blocks;
        self.dirty = true;
    }
}

impl TemplateHost for TemplateEditor {
    fn on_add_block(&mut self, block: ContentBlock) {
        self.append_block(block);
    }

    fn on_set_template(&mut self, blocks: Vec<ContentBlock>) {
        self.replace_blocks(blocks);
    }
}
