//! Error types for ghostkit.
//!
//! Library crates use [`GhostkitError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all ghostkit operations.
#[derive(Debug, thiserror::Error)]
pub enum GhostkitError {
    /// Configuration loading or credential resolution error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level HTTP error talking to the Admin API.
    #[error("network error: {0}")]
    Network(String),

    /// Malformed JSON or Lexical content.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The Admin API returned no post for the given id or slug.
    #[error("post not found: {0}")]
    PostNotFound(String),

    /// Admin token signing failure.
    #[error("auth error: {0}")]
    Auth(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input that is well-formed but unusable (missing lexical body, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GhostkitError>;

impl GhostkitError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for GhostkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = GhostkitError::config("missing admin key");
        assert_eq!(err.to_string(), "config error: missing admin key");

        let err = GhostkitError::PostNotFound("my-snippets".into());
        assert_eq!(err.to_string(), "post not found: my-snippets");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: GhostkitError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, GhostkitError::Parse { .. }));
    }
}
