//! Shared error model and configuration for ghostkit.
//!
//! This crate is the foundation depended on by all other ghostkit crates.
//! It provides:
//! - [`GhostkitError`], the unified error type
//! - Configuration ([`AppConfig`], [`GhostConfig`], [`SnippetsConfig`], config loading)
//! - Admin API credential resolution ([`GhostCredentials`], [`resolve_credentials`])

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, GhostConfig, GhostCredentials, SnippetsConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, resolve_credentials, resolve_credentials_from,
};
pub use error::{GhostkitError, Result};
