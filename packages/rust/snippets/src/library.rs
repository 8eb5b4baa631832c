//! On-disk snippet library: one `<name>.json` file per snippet.

use std::path::{Path, PathBuf};

use tracing::debug;

use ghostkit_lexical::{Node, blocks_to_pretty_json};
use ghostkit_shared::{GhostkitError, Result};

use crate::extract::Segment;

/// File extension of saved snippets.
const SNIPPET_EXT: &str = "json";

/// A directory of saved snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetLibrary {
    dir: PathBuf,
}

impl SnippetLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a snippet of this name is stored in. The name is used verbatim.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{SNIPPET_EXT}"))
    }

    /// Write a segment's blocks, replacing any snippet of the same name.
    pub fn save(&self, segment: &Segment) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| GhostkitError::io(&self.dir, e))?;

        let path = self.path_for(&segment.name);
        let json = blocks_to_pretty_json(&segment.blocks)?;
        std::fs::write(&path, json).map_err(|e| GhostkitError::io(&path, e))?;

        debug!(path = %path.display(), blocks = segment.blocks.len(), "saved snippet");
        Ok(path)
    }

    /// Names of all saved snippets, sorted. A missing directory is an empty library.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| GhostkitError::io(&self.dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| GhostkitError::io(&self.dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == SNIPPET_EXT) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load a saved snippet's blocks.
    pub fn load(&self, name: &str) -> Result<Vec<Node>> {
        let path = self.path_for(name);
        let content = std::fs::read_to_string(&path).map_err(|e| GhostkitError::io(&path, e))?;
        serde_json::from_str(&content)
            .map_err(|e| GhostkitError::parse(format!("invalid snippet {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostkit_lexical::{Card, Format, VideoCard, heading, paragraph};
    use serde_json::json;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("gk-library-test-{}", uuid::Uuid::now_v7()))
    }

    fn segment(name: &str, blocks: Vec<Node>) -> Segment {
        Segment {
            name: name.into(),
            blocks,
            start_index: 0,
        }
    }

    #[test]
    fn save_creates_dir_and_roundtrips() {
        let tmp = temp_dir();
        let library = SnippetLibrary::new(tmp.join("library"));

        let raw: Node = serde_json::from_value(json!({
            "type": "callout",
            "version": 1,
            "calloutText": "<p>Subscribe</p>",
            "calloutEmoji": "💡"
        }))
        .unwrap();
        let blocks = vec![
            heading("Title", 2, Format::BOLD),
            raw,
            Card::from(VideoCard::new("v.mp4")).to_node().unwrap(),
        ];

        let path = library.save(&segment("newsletter-footer", blocks.clone())).unwrap();

        assert_eq!(path, tmp.join("library").join("newsletter-footer.json"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n  {"), "expected 2-space indent: {content}");
        assert_eq!(library.load("newsletter-footer").unwrap(), blocks);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn save_overwrites_same_name() {
        let tmp = temp_dir();
        let library = SnippetLibrary::new(&tmp);

        library.save(&segment("sig", vec![paragraph("old", Format::NONE)])).unwrap();
        library.save(&segment("sig", vec![paragraph("new", Format::NONE)])).unwrap();

        let loaded = library.load("sig").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].run_text().as_deref(), Some("new"));
        assert_eq!(library.list().unwrap(), vec!["sig"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn empty_segment_saves_empty_array() {
        let tmp = temp_dir();
        let library = SnippetLibrary::new(&tmp);

        let path = library.save(&segment("empty", vec![])).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn list_sorted_json_only() {
        let tmp = temp_dir();
        let library = SnippetLibrary::new(&tmp);

        library.save(&segment("zeta", vec![])).unwrap();
        library.save(&segment("alpha", vec![])).unwrap();
        std::fs::write(tmp.join("notes.txt"), "ignored").unwrap();

        assert_eq!(library.list().unwrap(), vec!["alpha", "zeta"]);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_dir_lists_nothing() {
        let library = SnippetLibrary::new(temp_dir());
        assert!(library.list().unwrap().is_empty());
    }

    #[test]
    fn load_missing_is_io_error() {
        let library = SnippetLibrary::new(temp_dir());
        assert!(matches!(
            library.load("nope").unwrap_err(),
            GhostkitError::Io { .. }
        ));
    }
}
