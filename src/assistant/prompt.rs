//! Prompt generation for language-model engines
//!
//! Builds a prose prompt from the utterance and the recent conversation and
//! pins down the JSON reply shape the reply parser expects.

use super::message::{Message, Role};

/// Build the prompt for a single generation
pub fn build_prompt(utterance: &str, history: &[Message]) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are an email newsletter assistant inside a template builder.\n");
    prompt.push_str(
        "The user describes content they want and you propose content blocks for the email.\n\n",
    );

    if !history.is_empty() {
        prompt.push_str("## Conversation so far\n");
        for message in history {
            let speaker = match message.role {
                Role::User => "User",
                Role::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{}: {}\n", speaker, message.content));
            for block in message.suggestions.blocks() {
                prompt.push_str(&format!(
                    "  - suggested {}: {}\n",
                    block.kind().as_str(),
                    block.summary()
                ));
            }
        }
        prompt.push('\n');
    }

    prompt.push_str("## Request\n");
    prompt.push_str(utterance.trim());
    prompt.push_str("\n\n");

    prompt.push_str("## Instructions\n");
    prompt.push_str("Respond with ONLY a JSON object, no prose before or after it:\n");
    prompt.push_str(
        "{\"text\": \"<one short sentence for the user>\", \"blocks\": [<block>, ...]}\n\n",
    );
    prompt.push_str("Each block is one of:\n");
    prompt.push_str("- {\"type\": \"title\", \"content\": \"...\"}\n");
    prompt.push_str("- {\"type\": \"text\", \"content\": \"...\"}\n");
    prompt.push_str("- {\"type\": \"button\", \"label\": \"...\", \"href\": \"...\"}\n");
    prompt.push_str("- {\"type\": \"image\", \"src\": \"...\", \"alt\": \"...\"}\n");
    prompt.push_str("- {\"type\": \"divider\"}\n");
    prompt.push_str("- {\"type\": \"spacer\", \"height\": 20}\n\n");
    prompt.push_str("Propose between 1 and 6 blocks in reading order. Use \"#\" for unknown links.\n");

    prompt
}
