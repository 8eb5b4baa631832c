//! Ghost Admin API access.
//!
//! Requests are authorized with a short-lived token signed from the site's
//! admin key (see [`AdminKey`]). The extraction pipeline only depends on the
//! narrow [`PostSource`] trait, so it can run against in-memory fixtures.

mod client;
mod key;

pub use client::{AdminClient, Post, PostSource, post_endpoint};
pub use key::{ADMIN_AUDIENCE, AdminClaims, AdminKey, TOKEN_LIFETIME_SECS};
