//! Admin API client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use ghostkit_lexical::Document;
use ghostkit_shared::{GhostConfig, GhostCredentials, GhostkitError, Result, resolve_credentials};

use crate::key::AdminKey;

/// Path prefix of every Admin API endpoint.
const ADMIN_API_PATH: &str = "/ghost/api/admin";

/// User-Agent string for Admin API requests.
const USER_AGENT: &str = concat!("ghostkit/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// A post as returned by `GET /posts/...?formats=lexical`.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    /// `draft`, `published`, `scheduled`, ...
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Lexical body; the API sends it as a JSON-encoded string.
    #[serde(default)]
    pub lexical: Option<Value>,
}

impl Post {
    /// Parse the post's Lexical body.
    pub fn document(&self) -> Result<Document> {
        match &self.lexical {
            Some(value) if !value.is_null() => Document::from_value(value.clone()),
            _ => Err(GhostkitError::validation(format!(
                "post '{}' has no lexical content",
                self.title
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostsEnvelope {
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

// ---------------------------------------------------------------------------
// PostSource
// ---------------------------------------------------------------------------

/// Anything that can produce a post by id or slug.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_post(&self, post_ref: &str) -> Result<Post>;
}

// ---------------------------------------------------------------------------
// AdminClient
// ---------------------------------------------------------------------------

/// Token-signing client for the Admin API.
///
/// Every request gets a freshly signed token; there is no retry and no
/// explicit timeout beyond the transport defaults.
#[derive(Debug, Clone)]
pub struct AdminClient {
    client: Client,
    base_url: String,
    key: AdminKey,
    accept_version: String,
}

impl AdminClient {
    /// Build a client from already-resolved credentials.
    pub fn new(credentials: &GhostCredentials, accept_version: &str) -> Result<Self> {
        let key = AdminKey::parse(&credentials.admin_key)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GhostkitError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: credentials.api_url.as_str().trim_end_matches('/').to_string(),
            key,
            accept_version: accept_version.to_string(),
        })
    }

    /// Resolve credentials from the environment / fallback files and build a client.
    pub fn from_config(config: &GhostConfig) -> Result<Self> {
        let credentials = resolve_credentials(config)?;
        Self::new(&credentials, &config.accept_version)
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{ADMIN_API_PATH}{endpoint}", self.base_url)
    }

    /// Issue a signed GET and parse the body as JSON, whatever the status.
    #[instrument(skip(self))]
    pub async fn get_json(&self, endpoint: &str) -> Result<Value> {
        let url = self.url_for(endpoint);
        let token = self.key.sign_token()?;

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Ghost {token}"))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header("Accept-Version", &self.accept_version)
            .send()
            .await
            .map_err(|e| GhostkitError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GhostkitError::Network(format!("{url}: failed to read body: {e}")))?;

        debug!(%status, len = body.len(), "admin API response");

        serde_json::from_str(&body)
            .map_err(|_| GhostkitError::parse(format!("invalid JSON response: {body}")))
    }
}

#[async_trait]
impl PostSource for AdminClient {
    #[instrument(skip(self))]
    async fn fetch_post(&self, post_ref: &str) -> Result<Post> {
        let body = self.get_json(&post_endpoint(post_ref)).await?;
        let envelope: PostsEnvelope = serde_json::from_value(body)
            .map_err(|e| GhostkitError::parse(format!("unexpected posts response: {e}")))?;

        let Some(post) = envelope.posts.into_iter().next() else {
            let reason = envelope
                .errors
                .first()
                .map(|e| format!(" ({})", e.message))
                .unwrap_or_default();
            return Err(GhostkitError::PostNotFound(format!("{post_ref}{reason}")));
        };

        info!(id = %post.id, title = %post.title, status = %post.status, "fetched post");
        Ok(post)
    }
}

/// Endpoint for a post reference: 24-hex-char ids go to `/posts/{id}/`,
/// everything else is treated as a slug.
pub fn post_endpoint(post_ref: &str) -> String {
    if is_object_id(post_ref) {
        format!("/posts/{post_ref}/?formats=lexical")
    } else {
        format!("/posts/slug/{post_ref}/?formats=lexical")
    }
}

fn is_object_id(s: &str) -> bool {
    s.len() == 24 && s.chars().all(|c| c.is_ascii_hexdigit())
}
