//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use ghostkit_admin::AdminClient;
use ghostkit_lexical::{
    example_specs, parse_block_specs, stringify, structured_to_document, text_to_document,
};
use ghostkit_shared::{AppConfig, init_config, load_config};
use ghostkit_snippets::{ExtractOptions, SnippetLibrary, extract_snippets, validate_post};
use tracing::info;

use crate::progress::CliProgress;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ghostkit: Lexical documents and reusable snippets for Ghost.
#[derive(Debug, Parser)]
#[command(
    name = "ghostkit",
    version,
    about = "Build Ghost Lexical documents and extract reusable snippets from posts.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Snippet library directory (overrides `snippets.library_dir`).
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Split a post into snippets at marker paragraphs and save them.
    ///
    /// Every paragraph starting with the marker (`SNIPPET: name`) opens a
    /// snippet that runs until the next marker. Content before the first
    /// marker is ignored.
    Extract {
        /// Post id (24 hex characters) or slug.
        post_ref: String,

        /// Preview the extraction without writing any files.
        #[arg(long)]
        dry_run: bool,

        /// Check the post's marker layout without extracting.
        #[arg(long)]
        validate: bool,

        /// Marker prefix (defaults to `snippets.marker`).
        #[arg(long, allow_hyphen_values = true)]
        marker: Option<String>,
    },

    /// Build Lexical JSON from text or structured input.
    Lexical {
        #[command(subcommand)]
        action: LexicalAction,
    },

    /// Inspect the snippet library.
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Lexical builder subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum LexicalAction {
    /// Plain text; blank lines separate paragraphs.
    Text {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// JSON array of `{"type": "h2", "text": "...", "bold": true}` blocks.
    Structured {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        json: Vec<String>,
    },
    /// Print sample structured input and the document it produces.
    Example,
}

/// Snippet library subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum LibraryAction {
    /// List saved snippets.
    List,
    /// Show a saved snippet.
    Preview {
        /// Snippet name.
        name: String,
    },
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "ghostkit=info",
        1 => "ghostkit=debug",
        _ => "ghostkit=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbose > 0;
    let library = cli.library;

    match cli.command {
        Command::Extract {
            post_ref,
            dry_run,
            validate,
            marker,
        } => {
            let config = load_config()?;
            let options = ExtractOptions {
                marker: marker.unwrap_or_else(|| config.snippets.marker.clone()),
                dry_run,
                verbose,
                library: resolve_library(library, &config),
            };
            if validate {
                cmd_validate(&config, &post_ref, &options).await
            } else {
                cmd_extract(&config, &post_ref, &options).await
            }
        }
        Command::Lexical { action } => match action {
            LexicalAction::Text { text } => cmd_lexical_text(&text.join(" ")),
            LexicalAction::Structured { json } => cmd_lexical_structured(&json.join(" ")),
            LexicalAction::Example => cmd_lexical_example(),
        },
        Command::Library { action } => {
            let config = load_config()?;
            let library = resolve_library(library, &config);
            match action {
                LibraryAction::List => cmd_library_list(&library),
                LibraryAction::Preview { name } => cmd_library_preview(&library, &name),
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

fn resolve_library(flag: Option<PathBuf>, config: &AppConfig) -> SnippetLibrary {
    SnippetLibrary::new(flag.unwrap_or_else(|| PathBuf::from(&config.snippets.library_dir)))
}

// ---------------------------------------------------------------------------
// extract
// ---------------------------------------------------------------------------

async fn cmd_extract(config: &AppConfig, post_ref: &str, options: &ExtractOptions) -> Result<()> {
    // Credentials are checked before any network call.
    let client = AdminClient::from_config(&config.ghost)?;

    info!(post_ref, dry_run = options.dry_run, "extracting snippets");

    let reporter = CliProgress::new();
    reporter.banner();
    let report = extract_snippets(&client, post_ref, options, &reporter).await?;

    println!("Extraction complete");
    println!("  Snippets: {}", report.snippets.len());
    println!("  Library:  {}", report.library_dir.display());
    if report.discarded_blocks > 0 {
        println!(
            "  Ignored:  {} block(s) before the first marker",
            report.discarded_blocks
        );
    }
    println!();

    if report.dry_run {
        println!("  DRY RUN: no files were written. Remove --dry-run to save snippets.");
    } else if let Some(first) = report.snippets.first() {
        println!("  List:    ghostkit library list");
        println!("  Preview: ghostkit library preview {}", first.segment.name);
    }
    println!();

    Ok(())
}

async fn cmd_validate(config: &AppConfig, post_ref: &str, options: &ExtractOptions) -> Result<()> {
    let client = AdminClient::from_config(&config.ghost)?;

    info!(post_ref, "validating snippet post");

    let reporter = CliProgress::new();
    let report = validate_post(&client, post_ref, options, &reporter).await?;

    // An invalid layout is reported, not raised.
    println!("Validation results:");
    if report.is_valid() {
        println!("  Format looks good: {} snippet(s)", report.extract.snippets.len());
        println!();
        println!("  Run without --validate to extract them.");
    } else {
        println!("  No snippets found.");
        println!();
        println!("  Expected format:");
        println!("    {} snippet-name", options.marker);
        println!("    [snippet content]");
        println!("    {} another-snippet", options.marker);
        println!("    [snippet content]");
    }
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// lexical
// ---------------------------------------------------------------------------

fn cmd_lexical_text(text: &str) -> Result<()> {
    let document = text_to_document(text);
    println!("{}", stringify(&document)?);
    Ok(())
}

fn cmd_lexical_structured(json: &str) -> Result<()> {
    let specs = parse_block_specs(json).wrap_err("invalid structured input")?;
    let document = structured_to_document(&specs);
    println!("{}", stringify(&document)?);
    Ok(())
}

fn cmd_lexical_example() -> Result<()> {
    let specs = example_specs();
    let document = structured_to_document(&specs);

    println!("Example structured content:");
    println!("{}", serde_json::to_string_pretty(&specs)?);
    println!();
    println!("Resulting Lexical:");
    println!("{}", document.to_pretty_json()?);
    Ok(())
}

// ---------------------------------------------------------------------------
// library
// ---------------------------------------------------------------------------

fn cmd_library_list(library: &SnippetLibrary) -> Result<()> {
    let names = library.list()?;
    if names.is_empty() {
        println!("No snippets in {}", library.dir().display());
        return Ok(());
    }

    println!("Snippets in {}:", library.dir().display());
    for name in names {
        println!("  {name}");
    }
    Ok(())
}

fn cmd_library_preview(library: &SnippetLibrary, name: &str) -> Result<()> {
    let path = library.path_for(name);
    if !path.exists() {
        return Err(eyre!(
            "snippet '{name}' not found in {}",
            library.dir().display()
        ));
    }

    let blocks = library.load(name)?;
    let kinds: Vec<&str> = blocks.iter().map(|b| b.kind.as_str()).collect();

    println!("Snippet: {name}");
    println!("  Blocks: {}", blocks.len());
    println!("  Types:  {}", kinds.join(", "));
    println!();
    println!("{}", ghostkit_lexical::blocks_to_pretty_json(&blocks)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_flags() {
        let cli = Cli::try_parse_from([
            "ghostkit",
            "-v",
            "extract",
            "my-snippets",
            "--dry-run",
            "--marker",
            "--- SNIPPET:",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Extract {
                post_ref,
                dry_run,
                validate,
                marker,
            } => {
                assert_eq!(post_ref, "my-snippets");
                assert!(dry_run);
                assert!(!validate);
                assert_eq!(marker.as_deref(), Some("--- SNIPPET:"));
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn extract_requires_post_ref() {
        let err = Cli::try_parse_from(["ghostkit", "extract"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["ghostkit", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }

    #[test]
    fn library_flag_overrides_config() {
        let cli = Cli::try_parse_from(["ghostkit", "library", "list", "--library", "/tmp/lib"])
            .unwrap();
        let library = resolve_library(cli.library, &AppConfig::default());
        assert_eq!(library.dir(), std::path::Path::new("/tmp/lib"));

        let library = resolve_library(None, &AppConfig::default());
        assert_eq!(library.dir(), std::path::Path::new("snippets/library"));
    }

    #[test]
    fn lexical_text_joins_words() {
        let cli = Cli::try_parse_from(["ghostkit", "lexical", "text", "Para", "one"]).unwrap();
        match cli.command {
            Command::Lexical {
                action: LexicalAction::Text { text },
            } => assert_eq!(text.join(" "), "Para one"),
            _ => panic!("expected lexical text"),
        }
    }

    #[test]
    fn structured_rejects_invalid_json() {
        assert!(cmd_lexical_structured("[{not json").is_err());
        assert!(cmd_lexical_structured(r#"[{"type":"h2","text":"Title"}]"#).is_ok());
    }
}
