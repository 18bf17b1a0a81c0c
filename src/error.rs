use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailsmithError {
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid template JSON in {}: {source}", path.display())]
    InvalidTemplate {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No template file to save to. Start mailsmith with a TEMPLATE path to enable saving.")]
    NoTemplatePath,

    #[error("Failed to encode template: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
