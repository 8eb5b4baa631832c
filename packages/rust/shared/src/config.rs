//! Application configuration for ghostkit.
//!
//! User config lives at `~/.ghostkit/ghostkit.toml`.
//! CLI flags override config file values, which override defaults.
//!
//! Admin API credentials are never stored in this file. They come from the
//! environment (`GHOST_API_URL` / `GHOST_ADMIN_KEY` by default) or from the
//! plain-text fallback files `api_url` and `api_key` in the credentials directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{GhostkitError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "ghostkit.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".ghostkit";

/// Fallback credential file holding the Admin API base URL.
const API_URL_FILE: &str = "api_url";

/// Fallback credential file holding the `{id}:{secret}` admin key.
const API_KEY_FILE: &str = "api_key";

// ---------------------------------------------------------------------------
// Config structs (matching ghostkit.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Admin API connection settings.
    #[serde(default)]
    pub ghost: GhostConfig,

    /// Snippet extraction settings.
    #[serde(default)]
    pub snippets: SnippetsConfig,
}

/// `[ghost]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostConfig {
    /// Name of the env var holding the Admin API base URL.
    #[serde(default = "default_api_url_env")]
    pub api_url_env: String,

    /// Name of the env var holding the admin key (never store the key itself).
    #[serde(default = "default_admin_key_env")]
    pub admin_key_env: String,

    /// Directory with fallback `api_url` / `api_key` files.
    /// Defaults to `~/.config/ghost` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_dir: Option<String>,

    /// Value sent in the `Accept-Version` header.
    #[serde(default = "default_accept_version")]
    pub accept_version: String,
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            api_url_env: default_api_url_env(),
            admin_key_env: default_admin_key_env(),
            credentials_dir: None,
            accept_version: default_accept_version(),
        }
    }
}

fn default_api_url_env() -> String {
    "GHOST_API_URL".into()
}
fn default_admin_key_env() -> String {
    "GHOST_ADMIN_KEY".into()
}
fn default_accept_version() -> String {
    "v5.0".into()
}

/// `[snippets]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnippetsConfig {
    /// Directory extracted snippets are written to.
    #[serde(default = "default_library_dir")]
    pub library_dir: String,

    /// Paragraph prefix that opens a new snippet.
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for SnippetsConfig {
    fn default() -> Self {
        Self {
            library_dir: default_library_dir(),
            marker: default_marker(),
        }
    }
}

fn default_library_dir() -> String {
    "snippets/library".into()
}
fn default_marker() -> String {
    "SNIPPET:".into()
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Resolved Admin API credentials.
#[derive(Debug, Clone)]
pub struct GhostCredentials {
    /// Site base URL, e.g. `https://blog.example.com`.
    pub api_url: Url,
    /// Raw `{id}:{secret}` admin key.
    pub admin_key: String,
}

impl GhostConfig {
    /// Directory holding the fallback credential files, if one can be determined.
    pub fn credentials_dir(&self) -> Option<PathBuf> {
        match &self.credentials_dir {
            Some(dir) => Some(PathBuf::from(dir)),
            None => dirs::home_dir().map(|home| home.join(".config").join("ghost")),
        }
    }
}

/// Resolve Admin API credentials from the environment, falling back to files.
///
/// Fails before any network activity when either value is missing.
pub fn resolve_credentials(config: &GhostConfig) -> Result<GhostCredentials> {
    let api_url = non_empty_env(&config.api_url_env);
    let admin_key = non_empty_env(&config.admin_key_env);
    resolve_credentials_from(
        api_url,
        admin_key,
        config.credentials_dir().as_deref(),
        config,
    )
}

/// Credential resolution with the environment lookups already done.
///
/// When either value is missing and both fallback files exist, the file
/// values replace both.
pub fn resolve_credentials_from(
    mut api_url: Option<String>,
    mut admin_key: Option<String>,
    credentials_dir: Option<&Path>,
    config: &GhostConfig,
) -> Result<GhostCredentials> {
    if api_url.is_none() || admin_key.is_none() {
        if let Some(dir) = credentials_dir {
            let url_path = dir.join(API_URL_FILE);
            let key_path = dir.join(API_KEY_FILE);

            if url_path.exists() && key_path.exists() {
                api_url = read_trimmed(&url_path);
                admin_key = read_trimmed(&key_path);
                tracing::debug!(dir = %dir.display(), "loaded credentials from fallback files");
            }
        }
    }

    let (Some(api_url), Some(admin_key)) = (api_url, admin_key) else {
        return Err(GhostkitError::config(format!(
            "Ghost credentials required. Set environment variables {} and {}, \
             or create config files api_url and api_key in ~/.config/ghost/",
            config.api_url_env, config.admin_key_env
        )));
    };

    let api_url = Url::parse(&api_url)
        .map_err(|e| GhostkitError::config(format!("invalid API URL '{api_url}': {e}")))?;

    Ok(GhostCredentials { api_url, admin_key })
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.ghostkit/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GhostkitError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.ghostkit/ghostkit.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| GhostkitError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| GhostkitError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| GhostkitError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| GhostkitError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| GhostkitError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("gk-config-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("library_dir"));
        assert!(toml_str.contains("GHOST_ADMIN_KEY"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.snippets.marker, "SNIPPET:");
        assert_eq!(parsed.ghost.accept_version, "v5.0");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[snippets]
marker = "--- SNIPPET:"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.snippets.marker, "--- SNIPPET:");
        assert_eq!(config.snippets.library_dir, "snippets/library");
        assert_eq!(config.ghost.api_url_env, "GHOST_API_URL");
    }

    #[test]
    fn credentials_from_values() {
        let config = GhostConfig::default();
        let creds = resolve_credentials_from(
            Some("https://blog.example.com".into()),
            Some("abc:0123".into()),
            None,
            &config,
        )
        .unwrap();
        assert_eq!(creds.api_url.host_str(), Some("blog.example.com"));
        assert_eq!(creds.admin_key, "abc:0123");
    }

    #[test]
    fn credentials_fall_back_to_files() {
        let dir = temp_dir();
        std::fs::write(dir.join("api_url"), "https://files.example.com\n").unwrap();
        std::fs::write(dir.join("api_key"), "  id:beef  \n").unwrap();

        let config = GhostConfig::default();
        let creds =
            resolve_credentials_from(Some("https://env.example.com".into()), None, Some(&dir), &config)
                .unwrap();

        // Both values come from the files once the fallback kicks in.
        assert_eq!(creds.api_url.host_str(), Some("files.example.com"));
        assert_eq!(creds.admin_key, "id:beef");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_credentials_is_config_error() {
        let dir = temp_dir();
        let mut config = GhostConfig::default();
        config.admin_key_env = "GK_TEST_NONEXISTENT_KEY_12345".into();

        let err = resolve_credentials_from(None, None, Some(&dir), &config).unwrap_err();
        assert!(matches!(err, GhostkitError::Config { .. }));
        assert!(err.to_string().contains("GK_TEST_NONEXISTENT_KEY_12345"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_url_is_config_error() {
        let config = GhostConfig::default();
        let err =
            resolve_credentials_from(Some("not a url".into()), Some("a:b".into()), None, &config)
                .unwrap_err();
        assert!(err.to_string().contains("invalid API URL"));
    }
}
