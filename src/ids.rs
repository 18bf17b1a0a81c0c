//! Identifier generation for messages and content blocks

use uuid::Uuid;

/// Mint a new unique identifier
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
