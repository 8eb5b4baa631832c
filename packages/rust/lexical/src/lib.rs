//! Lexical document model and builders for the Ghost editor.
//!
//! Documents are trees of [`Node`]s under a single root. This crate can build
//! them from plain text or structured block specs, construct editor cards,
//! and serialize them for the Admin API.

pub mod builder;
pub mod card;
pub mod node;

pub use builder::{
    BlockSpec, build_document, example_specs, heading, heading_level,
    paragraph, parse_block_specs, structured_to_document, text_node, text_to_document,
};
pub use card::{
    AudioCard, ButtonCard, Card, EmbedCard, FileCard, PaywallCard, ProductCard, ToggleCard,
    VideoCard,
};
pub use node::{
    Document, EXTENDED_TEXT, Format, HEADING, Node, PARAGRAPH, ROOT, blocks_to_pretty_json,
};

/// Compact JSON for a post's `lexical` field.
pub fn stringify(document: &Document) -> ghostkit_shared::Result<String> {
    document.to_json()
}

/// Parse a document from either compact or indented JSON.
pub fn parse_document(json: &str) -> ghostkit_shared::Result<Document> {
    Document::from_json(json)
}
