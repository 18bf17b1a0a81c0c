//! Keyword heuristic engine
//!
//! Routes an utterance by substring match. Rules are checked in order and the
//! first match wins, so "welcome" beats "product" when both appear.

use std::time::Duration;

use futures::future::BoxFuture;

use super::{EngineError, Reply, SuggestionEngine};
use crate::assistant::message::Message;
use crate::blocks::{ContentBlock, create_button_block, create_text_block, create_title_block};

pub const WELCOME_REPLY: &str = "Here's a welcome email structure for you:";
pub const PRODUCT_REPLY: &str = "I've suggested a product section:";
pub const FALLBACK_REPLY: &str = "I've generated some blocks for you based on your request.";

/// Link target for suggested buttons until the user edits them
const PLACEHOLDER_HREF: &str = "#";

struct KeywordRule {
    keyword: &'static str,
    text: &'static str,
    blocks: fn() -> Vec<ContentBlock>,
}

const RULES: [KeywordRule; 2] = [
    KeywordRule {
        keyword: "welcome",
        text: WELCOME_REPLY,
        blocks: welcome_blocks,
    },
    KeywordRule {
        keyword: "product",
        text: PRODUCT_REPLY,
        blocks: product_blocks,
    },
];

fn welcome_blocks() -> Vec<ContentBlock> {
    vec![
        create_title_block("Welcome to our Newsletter!"),
        create_text_block(
            "We're so glad to have you with us. Stay tuned for exciting updates, tips, and exclusive offers.",
        ),
        create_button_block("Get Started", PLACEHOLDER_HREF),
    ]
}

fn product_blocks() -> Vec<ContentBlock> {
    vec![
        create_title_block("Featured Product"),
        create_text_block(
            "Check out our latest addition to the collection. Built with quality and style in mind.",
        ),
        create_button_block("Shop Now", PLACEHOLDER_HREF),
    ]
}

fn fallback_blocks() -> Vec<ContentBlock> {
    vec![
        create_title_block("New Section"),
        create_text_block("Tell me more about what you want to add here."),
    ]
}

/// Classify an utterance and build the matching reply
pub fn classify(utterance: &str) -> Reply {
    let normalized = utterance.to_lowercase();

    match RULES.iter().find(|rule| normalized.contains(rule.keyword)) {
        Some(rule) => Reply::new(rule.text, (rule.blocks)()),
        None => Reply::new(FALLBACK_REPLY, fallback_blocks()),
    }
}

/// Heuristic engine with an optional artificial delay
#[derive(Debug, Clone, Default)]
pub struct HeuristicEngine {
    delay: Duration,
}

impl HeuristicEngine {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SuggestionEngine for HeuristicEngine {
    fn generate<'a>(
        &'a self,
        utterance: &'a str,
        _history: &'a [Message],
    ) -> BoxFuture<'a, Result<Reply, EngineError>> {
        Box::pin(async move {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(classify(utterance))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockKind, BlockPayload};
    use proptest::prelude::*;

    fn kinds(reply: &Reply) -> Vec<BlockKind> {
        reply.blocks.iter().map(|b| b.kind()).collect()
    }

    fn button_label(reply: &Reply) -> Option<&str> {
        reply.blocks.iter().find_map(|b| match &b.payload {
            BlockPayload::Button { label, .. } => Some(label.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_welcome_route() {
        let reply = classify("Create a welcome email for a tech newsletter");
        assert_eq!(reply.text, WELCOME_REPLY);
        assert_eq!(
            kinds(&reply),
            vec![BlockKind::Title, BlockKind::Text, BlockKind::Button]
        );
        assert_eq!(button_label(&reply), Some("Get Started"));
        assert_eq!(reply.blocks[0].summary(), "Welcome to our Newsletter!");
    }

    #[test]
    fn test_product_route() {
        let reply = classify("Add a product section about new sneakers");
        assert_eq!(reply.text, PRODUCT_REPLY);
        assert_eq!(
            kinds(&reply),
            vec![BlockKind::Title, BlockKind::Text, BlockKind::Button]
        );
        assert_eq!(button_label(&reply), Some("Shop Now"));
    }

    #[test]
    fn test_fallback_route() {
        let reply = classify("make it pop");
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert_eq!(kinds(&reply), vec![BlockKind::Title, BlockKind::Text]);
        assert_eq!(button_label(&reply), None);
    }

    #[test]
    fn test_welcome_beats_product() {
        let reply = classify("welcome our new product");
        assert_eq!(reply.text, WELCOME_REPLY);
        assert_eq!(button_label(&reply), Some("Get Started"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(classify("WELCOME aboard").text, WELCOME_REPLY);
        assert_eq!(classify("New PRODUCTS!").text, PRODUCT_REPLY);
    }

    #[test]
    fn test_each_reply_mints_fresh_ids() {
        let a = classify("welcome");
        let b = classify("welcome");
        assert_ne!(a.blocks[0].id, b.blocks[0].id);
    }

    #[test]
    fn test_generate_resolves_with_classification() {
        let engine = HeuristicEngine::new(Duration::ZERO);
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let reply = rt.block_on(engine.generate("product launch", &[])).unwrap();
        assert_eq!(reply.text, PRODUCT_REPLY);
    }

    // Any utterance without either keyword takes the two-block fallback.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_no_keyword_means_fallback(utterance in "[a-vx-z ]{0,40}") {
            prop_assume!(!utterance.contains("product"));
            let reply = classify(&utterance);
            prop_assert_eq!(reply.text, FALLBACK_REPLY);
            prop_assert_eq!(reply.blocks.len(), 2);
        }
    }
}
