//! Console reporter for snippet extraction.

use std::time::Duration;

use ghostkit_snippets::{ExtractProgress, ExtractReport, ExtractedSnippet, PostSummary};
use indicatif::{ProgressBar, ProgressStyle};

/// Characters of a preview shown per snippet in verbose runs.
const PREVIEW_CHARS: usize = 100;

/// CLI progress reporter: a spinner while the post is fetched, then plain lines.
pub(crate) struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    pub(crate) fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        Self { spinner }
    }

    pub(crate) fn banner(&self) {
        println!();
        println!("  Ghost Snippet Extractor");
        println!();
    }
}

impl ExtractProgress for CliProgress {
    fn fetching(&self, post_ref: &str) {
        self.spinner.set_message(format!("Fetching post: {post_ref}"));
        self.spinner.enable_steady_tick(Duration::from_millis(80));
    }

    fn post_loaded(&self, post: &PostSummary, total_blocks: usize) {
        self.spinner.finish_and_clear();

        println!("Found: \"{}\"", post.title);
        println!("  Status:  {}", post.status);
        if let Some(updated_at) = post.updated_at {
            println!("  Updated: {}", updated_at.format("%Y-%m-%d"));
        }
        println!("  Blocks:  {total_blocks}");
        println!();
    }

    fn marker_found(&self, marker_text: &str, name: &str) {
        println!("Marker \"{marker_text}\" -> snippet \"{name}\"");
    }

    fn scanned(&self, snippet_count: usize, _discarded_blocks: usize) {
        println!();
        println!("Found {snippet_count} snippet(s)");
        println!();
    }

    fn snippet(&self, snippet: &ExtractedSnippet, verbose: bool) {
        let blocks = &snippet.segment.blocks;
        let kinds: Vec<&str> = blocks.iter().map(|b| b.kind.as_str()).collect();

        println!("Snippet: {}", snippet.segment.name);
        println!("  Blocks: {}", blocks.len());
        println!("  Types:  {}", kinds.join(", "));
        if snippet.saved {
            println!("  Saved:  {}", snippet.path.display());
        } else {
            println!("  [DRY RUN] Would save to: {}", snippet.path.display());
        }

        if verbose {
            if let Some(first) = blocks.first() {
                let json = serde_json::to_string_pretty(first).unwrap_or_default();
                let preview: String = json.chars().take(PREVIEW_CHARS).collect();
                println!("  Preview: {preview}...");
            }
        }
        println!();
    }

    fn done(&self, _report: &ExtractReport) {
        self.spinner.finish_and_clear();
    }
}
