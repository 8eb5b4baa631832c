//! Snippet extraction from a Ghost post.
//!
//! A post is split at marker paragraphs (`SNIPPET: <name>` by default) and
//! each named run of blocks is saved to a [`SnippetLibrary`] as a JSON array
//! of Lexical nodes, ready to paste into another post's `lexical` body.

mod extract;
mod library;
mod pipeline;

pub use extract::{DEFAULT_MARKER, Segment, extract_segments, marker_name, preamble_len};
pub use library::SnippetLibrary;
pub use pipeline::{
    ExtractOptions, ExtractProgress, ExtractReport, ExtractedSnippet, PostSummary, SilentProgress,
    ValidationReport, extract_snippets, validate_post,
};
