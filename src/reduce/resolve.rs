//! Child resolution shared by the table and form passes.

use crate::model::{Block, BlockType, DocumentGraph};

/// Join the text of a block's WORD children.
///
/// Each word's text is followed by a single space and the result is trimmed.
/// Children that are not WORD blocks, carry no text, or do not exist are
/// skipped.
pub fn word_text(graph: &DocumentGraph, block: &Block) -> String {
    let mut text = String::new();
    for word in graph.children(block).filter(|b| b.is(BlockType::Word)) {
        if let Some(ref t) = word.text {
            text.push_str(t);
            text.push(' ');
        }
    }
    text.trim().to_string()
}

/// Text of the value paired with a key block, or empty when unpaired.
pub fn value_text(graph: &DocumentGraph, key: &Block) -> String {
    graph
        .value_of(key)
        .map(|value| word_text(graph, value))
        .unwrap_or_default()
}
