//! Admin API keys and short-lived request tokens.
//!
//! An admin key is `{id}:{secret}` where the secret is hex. Each request is
//! authorized with an HS256 JWT signed by the decoded secret, carrying the
//! key id as `kid` and the `/admin/` audience.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use ghostkit_shared::{GhostkitError, Result};

/// Lifetime of a signed token (5 minutes).
pub const TOKEN_LIFETIME_SECS: i64 = 300;

/// Audience claim expected by the Admin API.
pub const ADMIN_AUDIENCE: &str = "/admin/";

/// JWT claims for an Admin API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Issued at (unix seconds).
    pub iat: i64,
    /// Expiration (unix seconds).
    pub exp: i64,
    pub aud: String,
}

/// A parsed admin key.
#[derive(Clone)]
pub struct AdminKey {
    id: String,
    secret: Vec<u8>,
}

impl AdminKey {
    /// Parse a `{id}:{secret}` credential string.
    pub fn parse(raw: &str) -> Result<Self> {
        let (id, secret) = raw
            .trim()
            .split_once(':')
            .ok_or_else(|| GhostkitError::config("admin key must be in {id}:{secret} format"))?;

        if id.is_empty() || secret.is_empty() {
            return Err(GhostkitError::config(
                "admin key must have a non-empty id and secret",
            ));
        }

        let secret = hex::decode(secret)
            .map_err(|e| GhostkitError::config(format!("admin key secret is not valid hex: {e}")))?;

        Ok(Self {
            id: id.to_string(),
            secret,
        })
    }

    /// Key id, sent as the token's `kid`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sign a token valid for [`TOKEN_LIFETIME_SECS`] from now.
    pub fn sign_token(&self) -> Result<String> {
        self.sign_token_at(Utc::now().timestamp())
    }

    /// Sign a token issued at the given unix timestamp.
    pub fn sign_token_at(&self, issued_at: i64) -> Result<String> {
        let claims = AdminClaims {
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
            aud: ADMIN_AUDIENCE.to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(self.id.clone());

        encode(&header, &claims, &EncodingKey::from_secret(&self.secret))
            .map_err(|e| GhostkitError::Auth(format!("failed to sign admin token: {e}")))
    }
}

impl std::fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminKey")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}
