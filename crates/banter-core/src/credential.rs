//! Credential registry: session credentials and display names.
//!
//! Registration always succeeds and issues an opaque 128-bit token rendered
//! as 32 lowercase hex characters. The mapping token → display name is
//! immutable and process-lifetime; credentials are never deleted.
//!
//! The registry is shared-read / exclusive-write: lookups take the read
//! lock, registration takes the write lock so token uniqueness holds under
//! concurrent calls.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use crate::env::Environment;

/// Opaque credential token identifying a registered display name.
///
/// Tokens are server-generated; clients only ever echo them back. The
/// literal `"null"` (what a browser serializes for a missing key) and the
/// empty string are sentinels meaning "no credential" and are never valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialToken(String);

impl CredentialToken {
    /// Wire sentinel for "the caller holds no credential".
    pub const SENTINEL: &'static str = "null";

    /// Wrap a raw token string received from a client.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Wrap an optional wire token, mapping absence to the sentinel.
    pub fn from_optional(raw: Option<String>) -> Self {
        raw.map_or_else(|| Self(Self::SENTINEL.to_string()), Self)
    }

    /// Generate a fresh token: 128 random bits as 32 lowercase hex chars.
    pub fn generate<E: Environment>(env: &E) -> Self {
        Self(format!("{:032x}", env.random_u128()))
    }

    /// Raw token string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the "no credential" markers (empty or `"null"`).
    pub fn is_sentinel(&self) -> bool {
        self.0.is_empty() || self.0 == Self::SENTINEL
    }
}

impl fmt::Display for CredentialToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry mapping credential tokens to display names.
///
/// Cloning is cheap and shares the underlying map. Lock poisoning panics:
/// it requires a panic elsewhere first, and no registry operation panics
/// while holding the lock.
#[derive(Debug, Clone, Default)]
pub struct CredentialRegistry {
    inner: Arc<RwLock<HashMap<CredentialToken, String>>>,
}

impl CredentialRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a display name and issue a fresh credential token.
    ///
    /// Always succeeds. Display names carry no uniqueness constraint; two
    /// registrations of the same name yield two distinct tokens.
    #[allow(clippy::expect_used)]
    pub fn register<E: Environment>(&self, display_name: &str, env: &E) -> CredentialToken {
        let mut map = self.inner.write().expect("RwLock poisoned");

        // Regenerate on collision: uniqueness is enforced here, not assumed
        // from the RNG.
        let mut token = CredentialToken::generate(env);
        while map.contains_key(&token) {
            token = CredentialToken::generate(env);
        }

        map.insert(token.clone(), display_name.to_string());
        tracing::debug!(token = %token, display_name, "credential registered");

        token
    }

    /// Display name for a token. `None` if the token was never issued.
    #[allow(clippy::expect_used)]
    pub fn resolve(&self, token: &CredentialToken) -> Option<String> {
        self.inner.read().expect("RwLock poisoned").get(token).cloned()
    }

    /// Check that a token is usable: not a sentinel and present in the
    /// registry.
    #[allow(clippy::expect_used)]
    pub fn is_valid(&self, token: &CredentialToken) -> bool {
        !token.is_sentinel() && self.inner.read().expect("RwLock poisoned").contains_key(token)
    }

    /// Total number of issued credentials.
    #[allow(clippy::expect_used)]
    pub fn credential_count(&self) -> usize {
        self.inner.read().expect("RwLock poisoned").len()
    }
}
