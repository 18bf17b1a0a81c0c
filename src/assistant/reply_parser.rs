//! Reply parsing for remote engines
//!
//! Remote engines answer with a JSON object of the form:
//! ```text
//! {"text": "I've suggested a product section:",
//!  "blocks": [{"type": "title", "content": "Featured Product"},
//!             {"type": "button", "label": "Shop Now", "href": "#"}]}
//! ```
//! Language models sometimes wrap it in a code fence or a sentence of prose,
//! so the object is located before it is decoded. Every block is rebuilt
//! through the block factory so it carries a freshly minted id.

use serde::Deserialize;

use super::engine::{EngineError, Reply};
use crate::blocks::factory::DEFAULT_SPACER_HEIGHT;
use crate::blocks::{
    BlockKind, ContentBlock, create_button_block, create_divider_block, create_image_block,
    create_spacer_block, create_text_block, create_title_block,
};

#[derive(Debug, Deserialize)]
struct RawReply {
    text: String,
    #[serde(default)]
    blocks: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: String,
    content: Option<String>,
    label: Option<String>,
    href: Option<String>,
    src: Option<String>,
    alt: Option<String>,
    height: Option<u16>,
}

/// Parse model output text into a reply
pub fn parse_reply(output: &str) -> Result<Reply, EngineError> {
    let json = extract_json_object(output)
        .ok_or_else(|| EngineError::Parse("no JSON object in reply".to_string()))?;
    let raw: RawReply =
        serde_json::from_str(json).map_err(|e| EngineError::Parse(e.to_string()))?;
    Ok(build_reply(raw))
}

/// Parse an already-decoded JSON value into a reply
pub fn parse_reply_value(value: serde_json::Value) -> Result<Reply, EngineError> {
    let raw: RawReply =
        serde_json::from_value(value).map_err(|e| EngineError::Parse(e.to_string()))?;
    Ok(build_reply(raw))
}

fn build_reply(raw: RawReply) -> Reply {
    let blocks = raw.blocks.into_iter().filter_map(build_block).collect();
    Reply::new(raw.text.trim(), blocks)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn build_block(raw: RawBlock) -> Option<ContentBlock> {
    let Some(kind) = BlockKind::parse_kind(&raw.kind) else {
        log::debug!("Skipping block of unknown type {:?}", raw.kind);
        return None;
    };

    let block = match kind {
        BlockKind::Title => create_title_block(non_empty(raw.content)?),
        BlockKind::Text => create_text_block(non_empty(raw.content)?),
        BlockKind::Button => create_button_block(
            non_empty(raw.label).or(non_empty(raw.content))?,
            non_empty(raw.href).unwrap_or_else(|| "#".to_string()),
        ),
        BlockKind::Image => create_image_block(non_empty(raw.src)?, raw.alt.unwrap_or_default()),
        BlockKind::Divider => create_divider_block(),
        BlockKind::Spacer => create_spacer_block(raw.height.unwrap_or(DEFAULT_SPACER_HEIGHT)),
    };
    Some(block)
}

/// Locate the JSON object inside model output
///
/// Prefers a fenced code block; otherwise takes the span from the first `{`
/// to the last `}`.
fn extract_json_object(output: &str) -> Option<&str> {
    if let Some(fence_start) = output.find("```") {
        let after_fence = &output[fence_start + 3..];
        let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after_fence[body_start..];
        if let Some(fence_end) = body.find("```") {
            let inner = body[..fence_end].trim();
            if inner.starts_with('{') {
                return Some(inner);
            }
        }
    }

    let start = output.find('{')?;
    let end = output.rfind('}')?;
    (end > start).then(|| &output[start..=end])
}

#[cfg(test)]
#[path = "reply_parser_tests.rs"]
mod reply_parser_tests;
