//! Builders that turn plain text or structured block specs into Lexical documents.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ghostkit_shared::Result;

use crate::node::{Document, EXTENDED_TEXT, Format, HEADING, Node, PARAGRAPH, ROOT};

/// `h` followed by a single digit.
static HEADING_TYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^h(\d)$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Node constructors
// ---------------------------------------------------------------------------

/// A single formatted text run.
pub fn text_node(text: &str, format: Format) -> Node {
    Node::new(EXTENDED_TEXT)
        .with_attr("detail", 0)
        .with_attr("format", format.bits())
        .with_attr("mode", "normal")
        .with_attr("style", "")
        .with_attr("text", text)
        .with_attr("version", 1)
}

/// A paragraph holding one text run.
pub fn paragraph(text: &str, format: Format) -> Node {
    element(PARAGRAPH, vec![text_node(text, format)])
}

/// A heading (`h{level}`) holding one text run.
pub fn heading(text: &str, level: u8, format: Format) -> Node {
    element(HEADING, vec![text_node(text, format)]).with_attr("tag", format!("h{level}"))
}

fn element(kind: &str, children: Vec<Node>) -> Node {
    Node::new(kind)
        .with_children(children)
        .with_attr("direction", "ltr")
        .with_attr("format", "")
        .with_attr("indent", 0)
        .with_attr("version", 1)
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Wrap top-level blocks in the root envelope.
pub fn build_document(blocks: Vec<Node>) -> Document {
    Document {
        root: element(ROOT, blocks),
    }
}

/// Convert plain text to a document, one paragraph per blank-line separated chunk.
pub fn text_to_document(text: &str) -> Document {
    let blocks: Vec<Node> = text
        .split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| paragraph(chunk, Format::NONE))
        .collect();

    debug!(paragraphs = blocks.len(), "built document from text");
    build_document(blocks)
}

/// One entry of structured input: `{"type": "h2", "text": "...", "bold": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    /// `p`, `h1`..`h9`; anything else is rendered as a paragraph.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
}

impl BlockSpec {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn format(&self) -> Format {
        Format::from_flags(self.bold, self.italic)
    }

    /// Render as a Lexical block.
    pub fn to_node(&self) -> Node {
        match heading_level(&self.kind) {
            Some(level) => heading(&self.text, level, self.format()),
            // "p" and every unrecognized type become paragraphs
            None => paragraph(&self.text, self.format()),
        }
    }
}

/// Heading level for types like `h2`, `None` for anything else.
pub fn heading_level(kind: &str) -> Option<u8> {
    HEADING_TYPE
        .captures(kind)
        .and_then(|caps| caps[1].parse().ok())
}

/// Convert structured block specs to a document, preserving order.
pub fn structured_to_document(specs: &[BlockSpec]) -> Document {
    build_document(specs.iter().map(BlockSpec::to_node).collect())
}

/// Parse a JSON array of block specs.
pub fn parse_block_specs(json: &str) -> Result<Vec<BlockSpec>> {
    Ok(serde_json::from_str(json)?)
}

/// Sample input for `lexical example`.
pub fn example_specs() -> Vec<BlockSpec> {
    vec![
        BlockSpec::new("h2", "Main Heading"),
        BlockSpec::new("p", "This is a normal paragraph."),
        BlockSpec::new("h3", "Subheading"),
        BlockSpec::new("p", "This is bold text.").bold(),
        BlockSpec::new("p", "This is italic text.").italic(),
        BlockSpec::new("p", "This is bold and italic.").bold().italic(),
    ]
}
