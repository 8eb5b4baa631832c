//! Generic Lexical node model.
//!
//! A [`Node`] keeps its `type`, its optional `children` and every other
//! attribute verbatim, so documents fetched from the Admin API survive a
//! parse/serialize round trip without losing card-specific fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use ghostkit_shared::Result;

/// `type` of the document root.
pub const ROOT: &str = "root";
/// `type` of a paragraph block.
pub const PARAGRAPH: &str = "paragraph";
/// `type` of a heading block.
pub const HEADING: &str = "heading";
/// `type` of a text run emitted by the Ghost editor.
pub const EXTENDED_TEXT: &str = "extended-text";

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// Text run format bitmask (bit0 = bold, bit1 = italic).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Format(pub u32);

impl Format {
    pub const NONE: Format = Format(0);
    pub const BOLD: Format = Format(1);
    pub const ITALIC: Format = Format(2);

    /// Combine bold/italic flags into a bitmask.
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        let mut format = Self::NONE;
        if bold {
            format = format | Self::BOLD;
        }
        if italic {
            format = format | Self::ITALIC;
        }
        format
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_bold(self) -> bool {
        self.0 & Self::BOLD.0 != 0
    }

    pub fn is_italic(self) -> bool {
        self.0 & Self::ITALIC.0 != 0
    }
}

impl std::ops::BitOr for Format {
    type Output = Format;

    fn bitor(self, rhs: Self) -> Self::Output {
        Format(self.0 | rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One node of a Lexical tree: root, block, text run or card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node kind (`paragraph`, `heading`, `extended-text`, `button`, ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Ordered child nodes, for element kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,

    /// All remaining attributes, in source order.
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl Node {
    /// Create a node of the given kind with no children and no attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            children: None,
            attrs: Map::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// Set the ordered child list.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Raw text of a text run.
    pub fn text(&self) -> Option<&str> {
        self.attr("text").and_then(Value::as_str)
    }

    /// Concatenated text of the direct child runs.
    ///
    /// Returns `None` for nodes without a child list. Children that carry no
    /// `text` (links, line breaks) contribute nothing.
    pub fn run_text(&self) -> Option<String> {
        self.children
            .as_ref()
            .map(|children| children.iter().filter_map(Node::text).collect())
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A complete Lexical document: `{"root": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub root: Node,
}

impl Document {
    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[Node] {
        self.root.children.as_deref().unwrap_or(&[])
    }

    pub fn into_blocks(self) -> Vec<Node> {
        self.root.children.unwrap_or_default()
    }

    /// Compact JSON, the form the Admin API expects in a post's `lexical` field.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Two-space indented JSON.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Accept either an embedded object or a JSON-encoded string.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(json) => Self::from_json(&json),
            other => Ok(serde_json::from_value(other)?),
        }
    }
}

/// Serialize a bare block sequence as two-space indented JSON.
pub fn blocks_to_pretty_json(blocks: &[Node]) -> Result<String> {
    Ok(serde_json::to_string_pretty(blocks)?)
}
