//! Marker scan that splits a block sequence into named segments.
//!
//! A marker is a paragraph whose trimmed run text starts with the marker
//! prefix. Each marker opens a segment that collects every following block
//! up to the next marker or the end of the document. Blocks before the first
//! marker belong to no segment and are dropped.

use tracing::trace;

use ghostkit_lexical::{Node, PARAGRAPH};

/// Marker prefix used when none is configured.
pub const DEFAULT_MARKER: &str = "SNIPPET:";

/// A named run of blocks found between two markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub blocks: Vec<Node>,
    /// Index of the opening marker in the scanned sequence.
    pub start_index: usize,
}

impl Segment {
    fn open(name: String, start_index: usize) -> Self {
        Self {
            name,
            blocks: Vec::new(),
            start_index,
        }
    }
}

/// Segment name carried by `block` if it is a marker.
///
/// Only paragraphs qualify. The prefix match is case-sensitive and anchored
/// at the start of the trimmed text.
pub fn marker_name(block: &Node, prefix: &str) -> Option<String> {
    if !block.is_kind(PARAGRAPH) {
        return None;
    }
    let text = block.run_text()?;
    text.trim()
        .strip_prefix(prefix)
        .map(|rest| rest.trim().to_string())
}

#[derive(Default)]
struct Scan {
    open: Option<Segment>,
    closed: Vec<Segment>,
}

/// Partition `blocks` into segments in a single forward pass.
///
/// Segments come back in marker order. Duplicate names are kept as separate
/// segments and a trailing marker yields an empty segment.
pub fn extract_segments(blocks: &[Node], prefix: &str) -> Vec<Segment> {
    let scan = blocks
        .iter()
        .enumerate()
        .fold(Scan::default(), |mut scan, (index, block)| {
            match marker_name(block, prefix) {
                Some(name) => {
                    trace!(index, %name, "marker");
                    let previous = scan.open.replace(Segment::open(name, index));
                    scan.closed.extend(previous);
                }
                None => match scan.open.as_mut() {
                    Some(segment) => segment.blocks.push(block.clone()),
                    None => trace!(index, kind = %block.kind, "dropping block before first marker"),
                },
            }
            scan
        });

    let mut segments = scan.closed;
    segments.extend(scan.open);
    segments
}

/// Number of leading blocks that precede the first marker.
pub fn preamble_len(segments: &[Segment], total_blocks: usize) -> usize {
    segments
        .first()
        .map_or(total_blocks, |segment| segment.start_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostkit_lexical::{ButtonCard, Card, Format, heading, paragraph};

    fn marker(name: &str) -> Node {
        paragraph(&format!("SNIPPET: {name}"), Format::NONE)
    }

    fn p(text: &str) -> Node {
        paragraph(text, Format::NONE)
    }

    fn names(segments: &[Segment]) -> Vec<&str> {
        segments.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn no_markers_no_segments() {
        let blocks = vec![p("one"), p("two"), heading("three", 2, Format::BOLD)];
        assert!(extract_segments(&blocks, DEFAULT_MARKER).is_empty());
        assert_eq!(preamble_len(&[], blocks.len()), 3);
    }

    #[test]
    fn blocks_grouped_under_markers() {
        let (b1, b2, b3) = (p("b1"), p("b2"), p("b3"));
        let blocks = vec![marker("a"), b1.clone(), b2.clone(), marker("b"), b3.clone()];

        let segments = extract_segments(&blocks, DEFAULT_MARKER);

        assert_eq!(names(&segments), vec!["a", "b"]);
        assert_eq!(segments[0].blocks, vec![b1, b2]);
        assert_eq!(segments[1].blocks, vec![b3]);
        assert_eq!(segments[0].start_index, 0);
        assert_eq!(segments[1].start_index, 3);
    }

    #[test]
    fn adjacent_markers_yield_empty_segment() {
        let c = p("c");
        let blocks = vec![marker("a"), marker("b"), c.clone()];

        let segments = extract_segments(&blocks, DEFAULT_MARKER);

        assert_eq!(names(&segments), vec!["a", "b"]);
        assert!(segments[0].blocks.is_empty());
        assert_eq!(segments[1].blocks, vec![c]);
    }

    #[test]
    fn trailing_marker_is_closed() {
        let blocks = vec![marker("a"), p("x"), marker("end")];
        let segments = extract_segments(&blocks, DEFAULT_MARKER);
        assert_eq!(names(&segments), vec!["a", "end"]);
        assert!(segments[1].blocks.is_empty());
    }

    #[test]
    fn preamble_is_dropped() {
        let intro = p("intro");
        let blocks = vec![intro.clone(), p("more intro"), marker("a"), p("body")];

        let segments = extract_segments(&blocks, DEFAULT_MARKER);

        assert_eq!(segments.len(), 1);
        assert!(segments.iter().all(|s| !s.blocks.contains(&intro)));
        assert_eq!(preamble_len(&segments, blocks.len()), 2);
    }

    #[test]
    fn duplicate_names_are_not_merged() {
        let blocks = vec![marker("sig"), p("first"), marker("sig"), p("second")];
        let segments = extract_segments(&blocks, DEFAULT_MARKER);
        assert_eq!(names(&segments), vec!["sig", "sig"]);
        assert_eq!(segments[1].blocks, vec![p("second")]);
    }

    #[test]
    fn only_paragraphs_are_markers() {
        let card = Card::from(ButtonCard::new("SNIPPET: nope", "#")).to_node().unwrap();
        let blocks = vec![
            marker("a"),
            heading("SNIPPET: not-a-marker", 2, Format::NONE),
            card.clone(),
        ];

        let segments = extract_segments(&blocks, DEFAULT_MARKER);

        assert_eq!(names(&segments), vec!["a"]);
        assert_eq!(segments[0].blocks.len(), 2);
        assert_eq!(segments[0].blocks[1], card);
    }

    #[test]
    fn prefix_must_lead_and_match_case() {
        assert_eq!(marker_name(&p("  SNIPPET:   spaced-name  "), "SNIPPET:").as_deref(), Some("spaced-name"));
        assert_eq!(marker_name(&p("snippet: lower"), "SNIPPET:"), None);
        assert_eq!(marker_name(&p("See SNIPPET: inline"), "SNIPPET:"), None);
        assert_eq!(marker_name(&p("SNIPPET:"), "SNIPPET:").as_deref(), Some(""));
    }

    #[test]
    fn custom_prefix() {
        let blocks = vec![p("--- SNIPPET: footer"), p("body"), marker("ignored")];
        let segments = extract_segments(&blocks, "--- SNIPPET:");
        assert_eq!(names(&segments), vec!["footer"]);
        assert_eq!(segments[0].blocks.len(), 2);
    }

    #[test]
    fn paragraph_without_children_is_content() {
        let bare = Node::new(PARAGRAPH);
        let blocks = vec![marker("a"), bare.clone()];
        let segments = extract_segments(&blocks, DEFAULT_MARKER);
        assert_eq!(segments[0].blocks, vec![bare]);
    }
}
