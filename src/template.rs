//! Email template document and the editor that owns it
//!
//! The editor is the single owner of the template's block list. The assistant
//! only reaches it through the two mutation entry points of [`TemplateHost`].

mod editor;
mod template_render;
mod template_state;

pub use editor::{TemplateEditor, TemplateHost};
pub use template_render::render_template;
pub use template_state::EmailTemplate;
