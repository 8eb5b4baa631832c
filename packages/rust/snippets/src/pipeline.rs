//! End-to-end extraction: post → Lexical blocks → segments → snippet library.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use ghostkit_admin::{Post, PostSource};
use ghostkit_shared::Result;

use crate::extract::{DEFAULT_MARKER, Segment, extract_segments, preamble_len};
use crate::library::SnippetLibrary;

/// Options for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Paragraph prefix that opens a snippet.
    pub marker: String,
    /// Scan and report, but write nothing.
    pub dry_run: bool,
    /// Report every marker and a preview of each snippet.
    pub verbose: bool,
    /// Where snippets are saved.
    pub library: SnippetLibrary,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            dry_run: false,
            verbose: false,
            library: SnippetLibrary::new("snippets/library"),
        }
    }
}

/// The parts of a post worth reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub status: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            status: post.status.clone(),
            updated_at: post.updated_at,
        }
    }
}

/// One segment and where it goes in the library.
#[derive(Debug, Clone)]
pub struct ExtractedSnippet {
    pub segment: Segment,
    /// Target file (written unless the run was a dry run).
    pub path: PathBuf,
    pub saved: bool,
}

/// Outcome of [`extract_snippets`].
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub post: PostSummary,
    /// Top-level blocks in the post.
    pub total_blocks: usize,
    /// Blocks before the first marker, which belong to no snippet.
    pub discarded_blocks: usize,
    pub snippets: Vec<ExtractedSnippet>,
    pub library_dir: PathBuf,
    pub dry_run: bool,
}

impl ExtractReport {
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.snippets.iter().map(|s| &s.segment)
    }

    pub fn saved_count(&self) -> usize {
        self.snippets.iter().filter(|s| s.saved).count()
    }
}

/// Outcome of [`validate_post`].
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub extract: ExtractReport,
}

impl ValidationReport {
    /// A post is well-formed when it holds at least one marker.
    pub fn is_valid(&self) -> bool {
        !self.extract.snippets.is_empty()
    }
}

/// Progress callback for reporting extraction status.
pub trait ExtractProgress: Send + Sync {
    /// Called before the post is requested.
    fn fetching(&self, post_ref: &str);
    /// Called once the post's Lexical body has been parsed.
    fn post_loaded(&self, post: &PostSummary, total_blocks: usize);
    /// Called per marker in verbose runs.
    fn marker_found(&self, marker_text: &str, name: &str);
    /// Called after the scan with the number of snippets found.
    fn scanned(&self, snippet_count: usize, discarded_blocks: usize);
    /// Called per snippet, after it has been saved (or skipped on dry runs).
    fn snippet(&self, snippet: &ExtractedSnippet, verbose: bool);
    /// Called when the run completes.
    fn done(&self, report: &ExtractReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ExtractProgress for SilentProgress {
    fn fetching(&self, _post_ref: &str) {}
    fn post_loaded(&self, _post: &PostSummary, _total_blocks: usize) {}
    fn marker_found(&self, _marker_text: &str, _name: &str) {}
    fn scanned(&self, _snippet_count: usize, _discarded_blocks: usize) {}
    fn snippet(&self, _snippet: &ExtractedSnippet, _verbose: bool) {}
    fn done(&self, _report: &ExtractReport) {}
}

/// Run the full extraction.
///
/// 1. Fetch the post and parse its Lexical body
/// 2. Scan the top-level blocks for markers
/// 3. Save each segment to the library (skipped on dry runs)
///
/// Any fetch or parse failure aborts before anything is written. A failed
/// write aborts the remaining writes.
#[instrument(skip_all, fields(post_ref = %post_ref, dry_run = options.dry_run, marker = %options.marker))]
pub async fn extract_snippets(
    source: &dyn PostSource,
    post_ref: &str,
    options: &ExtractOptions,
    progress: &dyn ExtractProgress,
) -> Result<ExtractReport> {
    progress.fetching(post_ref);
    let post = source.fetch_post(post_ref).await?;
    let document = post.document()?;
    let summary = PostSummary::from(&post);
    let blocks = document.blocks();

    progress.post_loaded(&summary, blocks.len());

    let segments = extract_segments(blocks, &options.marker);
    let discarded_blocks = preamble_len(&segments, blocks.len());

    if options.verbose {
        for segment in &segments {
            let marker_text = blocks[segment.start_index].run_text().unwrap_or_default();
            progress.marker_found(marker_text.trim(), &segment.name);
        }
    }

    info!(
        snippets = segments.len(),
        total_blocks = blocks.len(),
        discarded_blocks,
        "scan complete"
    );
    progress.scanned(segments.len(), discarded_blocks);

    let mut snippets = Vec::with_capacity(segments.len());
    for segment in segments {
        let (path, saved) = if options.dry_run {
            (options.library.path_for(&segment.name), false)
        } else {
            (options.library.save(&segment)?, true)
        };
        debug!(name = %segment.name, blocks = segment.blocks.len(), saved, "snippet");

        let snippet = ExtractedSnippet {
            segment,
            path,
            saved,
        };
        progress.snippet(&snippet, options.verbose);
        snippets.push(snippet);
    }

    let report = ExtractReport {
        post: summary,
        total_blocks: blocks.len(),
        discarded_blocks,
        snippets,
        library_dir: options.library.dir().to_path_buf(),
        dry_run: options.dry_run,
    };
    progress.done(&report);

    Ok(report)
}

/// Check that a post follows the marker format without writing anything.
pub async fn validate_post(
    source: &dyn PostSource,
    post_ref: &str,
    options: &ExtractOptions,
    progress: &dyn ExtractProgress,
) -> Result<ValidationReport> {
    let options = ExtractOptions {
        dry_run: true,
        verbose: true,
        ..options.clone()
    };
    let extract = extract_snippets(source, post_ref, &options, progress).await?;
    Ok(ValidationReport { extract })
}
